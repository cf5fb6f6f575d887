use alloc::collections::BTreeMap;
use core::mem;

use rowwindow::{RenderTarget, RowPlacement, Viewport};

#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingWrite<R> {
    Show(RowPlacement, R),
    Hide,
    Refresh(R),
}

/// A [`RenderTarget`] wrapper that holds row writes until the next paint tick.
///
/// Writes to the same row within one tick collapse to the last effective one:
/// - show then hide is a single hide, hide then show a single show
/// - a refresh of a row with a pending show updates the content that show will draw
/// - a refresh of a row with a pending hide is dropped
///
/// The spacer height is coalesced the same way (last value wins). Viewport reads and
/// listener attach/detach are not deferred.
///
/// Nothing reaches the wrapped target until [`flush`](Self::flush) is called.
#[derive(Clone, Debug)]
pub struct StyleBatcher<T, R> {
    inner: T,
    pending: BTreeMap<usize, PendingWrite<R>>,
    content_height: Option<u64>,
    flushed: u64,
}

impl<T, R> StyleBatcher<T, R> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            pending: BTreeMap::new(),
            content_height: None,
            flushed: 0,
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Returns the wrapped target. Pending writes are discarded.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Number of rows with a pending write.
    pub fn pending_rows(&self) -> usize {
        self.pending.len()
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty() || self.content_height.is_some()
    }

    /// Total writes issued to the wrapped target so far.
    pub fn flushed_writes(&self) -> u64 {
        self.flushed
    }

    /// Drops pending writes without applying them.
    pub fn discard(&mut self) {
        self.pending.clear();
        self.content_height = None;
    }
}

impl<T: RenderTarget<R>, R> StyleBatcher<T, R> {
    /// Applies every pending write to the wrapped target, rows in ascending order.
    ///
    /// Returns the number of writes issued.
    pub fn flush(&mut self) -> usize {
        let mut writes = 0usize;
        if let Some(height) = self.content_height.take() {
            self.inner.set_content_height(height);
            writes += 1;
        }

        for (index, write) in mem::take(&mut self.pending) {
            match write {
                PendingWrite::Show(placement, row) => self.inner.show_row(placement, &row),
                PendingWrite::Hide => self.inner.hide_row(index),
                PendingWrite::Refresh(row) => self.inner.refresh_row(index, &row),
            }
            writes += 1;
        }

        self.flushed += writes as u64;
        if writes > 0 {
            atrace!(writes, "StyleBatcher::flush");
        }
        writes
    }
}

impl<T: RenderTarget<R>, R: Clone> RenderTarget<R> for StyleBatcher<T, R> {
    fn viewport(&self) -> Option<Viewport> {
        self.inner.viewport()
    }

    fn set_content_height(&mut self, height: u64) {
        self.content_height = Some(height);
    }

    fn show_row(&mut self, placement: RowPlacement, row: &R) {
        self.pending
            .insert(placement.index, PendingWrite::Show(placement, row.clone()));
    }

    fn hide_row(&mut self, index: usize) {
        self.pending.insert(index, PendingWrite::Hide);
    }

    fn refresh_row(&mut self, index: usize, row: &R) {
        match self.pending.get_mut(&index) {
            Some(PendingWrite::Show(_, pending)) | Some(PendingWrite::Refresh(pending)) => {
                *pending = row.clone();
            }
            Some(PendingWrite::Hide) => {}
            None => {
                self.pending.insert(index, PendingWrite::Refresh(row.clone()));
            }
        }
    }

    fn attach_scroll_listener(&mut self) {
        self.inner.attach_scroll_listener();
    }

    fn detach_scroll_listener(&mut self) {
        self.inner.detach_scroll_listener();
    }
}
