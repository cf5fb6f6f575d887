use alloc::sync::Arc;

use crate::{WindowDelta, WindowRange};

/// A callback fired after a window sync that changed the visible set.
///
/// Receives the new window and the writes the sync issued.
pub type WindowChangeCallback = Arc<dyn Fn(WindowRange, WindowDelta) + Send + Sync>;

/// Configuration for [`crate::WindowedRowRenderer`], fixed at `init`.
///
/// This type is cheap to clone: the callback is stored in an `Arc`.
pub struct RendererOptions {
    /// Render only the rows near the viewport. When disabled every row is materialized at
    /// `init` and scroll notifications are ignored.
    pub virtual_scroll: bool,

    /// Reserved for chunked rendering; window decisions never read it.
    pub batch_size: usize,

    /// Uniform height of every row, in pixels. Must be non-zero.
    pub row_height: u32,

    /// Extra rows rendered past the viewport to reduce flicker on fast scroll.
    pub buffer_size: usize,

    /// Upper bound on cached row representations. `None` keeps every row ever rendered
    /// until `destroy`.
    pub cache_capacity: Option<usize>,

    /// Defer scroll-driven window syncs to the next `on_frame` call, so a burst of scroll
    /// notifications costs one sync per frame.
    pub coalesce_scroll: bool,

    pub on_window_change: Option<WindowChangeCallback>,
}

impl Clone for RendererOptions {
    fn clone(&self) -> Self {
        Self {
            virtual_scroll: self.virtual_scroll,
            batch_size: self.batch_size,
            row_height: self.row_height,
            buffer_size: self.buffer_size,
            cache_capacity: self.cache_capacity,
            coalesce_scroll: self.coalesce_scroll,
            on_window_change: self.on_window_change.clone(),
        }
    }
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self::new(40)
    }
}

impl RendererOptions {
    pub fn new(row_height: u32) -> Self {
        Self {
            virtual_scroll: true,
            batch_size: 50,
            row_height,
            buffer_size: 5,
            cache_capacity: None,
            coalesce_scroll: false,
            on_window_change: None,
        }
    }

    pub fn with_virtual_scroll(mut self, virtual_scroll: bool) -> Self {
        self.virtual_scroll = virtual_scroll;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Bounds the row cache. Rows that are currently visible are never dropped, so the
    /// effective bound is the larger of `capacity` and the window size.
    pub fn with_cache_capacity(mut self, capacity: Option<usize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_coalesce_scroll(mut self, coalesce_scroll: bool) -> Self {
        self.coalesce_scroll = coalesce_scroll;
        self
    }

    pub fn with_on_window_change(
        mut self,
        on_window_change: Option<impl Fn(WindowRange, WindowDelta) + Send + Sync + 'static>,
    ) -> Self {
        self.on_window_change = on_window_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for RendererOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RendererOptions")
            .field("virtual_scroll", &self.virtual_scroll)
            .field("batch_size", &self.batch_size)
            .field("row_height", &self.row_height)
            .field("buffer_size", &self.buffer_size)
            .field("cache_capacity", &self.cache_capacity)
            .field("coalesce_scroll", &self.coalesce_scroll)
            .finish_non_exhaustive()
    }
}
