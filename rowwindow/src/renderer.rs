use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::cache::RowCache;
use crate::window::{compute_window, total_height};
use crate::{
    Error, RenderTarget, RendererOptions, RendererStats, RowContent, RowPlacement, RowSource,
    ScrollState, WindowDelta, WindowRange,
};

struct Host<S, T> {
    source: S,
    target: T,
}

/// Renders only the rows of a large table that intersect the viewport (plus a buffer).
///
/// The renderer owns three pieces of state: the set of visible row indices, a cache of row
/// representations, and the last applied scroll geometry. Rows themselves belong to the host
/// [`RowSource`]; every visual write goes through the [`RenderTarget`].
///
/// After every window sync the visible set equals the current window exactly. A sync only
/// writes rows that entered or left the window, so the per-scroll cost is proportional to how
/// far the window moved rather than its size.
///
/// A renderer only exists after a successful [`init`](Self::init). After
/// [`destroy`](Self::destroy) it is inert and every operation is a no-op.
pub struct WindowedRowRenderer<S: RowSource, T> {
    options: RendererOptions,
    host: Option<Host<S, T>>,
    row_count: usize,
    scroll: ScrollState,
    window: WindowRange,
    visible: BTreeSet<usize>,
    cache: RowCache<S::Row>,

    tick: u64,
    listening: bool,
    scroll_pending: bool,
    stats: RendererStats,
}

impl<S: RowSource, T: RenderTarget<S::Row>> WindowedRowRenderer<S, T> {
    /// Takes over `source` and `target` and renders the initial window.
    ///
    /// Total content height is recorded once, as `row_count * row_height`. With
    /// `virtual_scroll` enabled the spacer is sized to it, the scroll listener is attached and
    /// rows `[0, ceil(viewport / row_height) + buffer_size)` are materialized; otherwise every
    /// row is.
    pub fn init(options: RendererOptions, source: S, mut target: T) -> Result<Self, Error> {
        if options.row_height == 0 {
            return Err(Error::ZeroRowHeight);
        }
        let viewport = target.viewport().ok_or(Error::ContainerUnavailable)?;

        let row_count = source.row_count();
        let total = total_height(row_count, options.row_height);
        rdebug!(
            row_count,
            row_height = options.row_height,
            viewport_height = viewport.height,
            virtual_scroll = options.virtual_scroll,
            "WindowedRowRenderer::init"
        );

        let listening = options.virtual_scroll;
        if listening {
            target.set_content_height(total);
            target.attach_scroll_listener();
        }

        let mut renderer = Self {
            cache: RowCache::new(options.cache_capacity),
            options,
            host: Some(Host { source, target }),
            row_count,
            scroll: ScrollState {
                scroll_top: 0,
                viewport_height: viewport.height,
                total_height: total,
            },
            window: WindowRange::EMPTY,
            visible: BTreeSet::new(),
            tick: 0,
            listening,
            scroll_pending: false,
            stats: RendererStats::default(),
        };
        let initial = renderer.window_for(0);
        renderer.apply_window(initial);
        Ok(renderer)
    }

    pub fn options(&self) -> &RendererOptions {
        &self.options
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn total_height(&self) -> u64 {
        self.scroll.total_height
    }

    /// The window computed by the last sync.
    pub fn window(&self) -> WindowRange {
        self.window
    }

    pub fn scroll_state(&self) -> ScrollState {
        self.scroll
    }

    pub fn stats(&self) -> RendererStats {
        self.stats
    }

    /// Visible row indices in ascending order.
    pub fn visible_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.visible.iter().copied()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.contains(&index)
    }

    pub fn is_cached(&self, index: usize) -> bool {
        self.cache.contains(index)
    }

    pub fn cached_row(&self, index: usize) -> Option<&S::Row> {
        self.cache.get(index)
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn is_destroyed(&self) -> bool {
        self.host.is_none()
    }

    pub fn has_pending_scroll(&self) -> bool {
        self.scroll_pending
    }

    pub fn source(&self) -> Option<&S> {
        self.host.as_ref().map(|h| &h.source)
    }

    pub fn target(&self) -> Option<&T> {
        self.host.as_ref().map(|h| &h.target)
    }

    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.host.as_mut().map(|h| &mut h.target)
    }

    /// Handles a scroll notification from the container.
    ///
    /// Syncs the window immediately, or with `coalesce_scroll` marks a sync as pending for the
    /// next [`on_frame`](Self::on_frame). Ignored when virtual scrolling is off or the renderer
    /// was destroyed.
    pub fn on_scroll(&mut self) -> WindowDelta {
        if !self.listening {
            return WindowDelta::default();
        }
        if self.options.coalesce_scroll {
            if self.scroll_pending {
                self.stats.coalesced_scrolls += 1;
            }
            self.scroll_pending = true;
            return WindowDelta::default();
        }
        self.sync_window()
    }

    /// Runs the sync deferred by coalesced scroll notifications, if any.
    ///
    /// The sync reads the container's offset at frame time, so the resulting window always
    /// matches the last scroll position regardless of how many notifications were folded.
    pub fn on_frame(&mut self) -> WindowDelta {
        if !self.scroll_pending {
            return WindowDelta::default();
        }
        self.scroll_pending = false;
        self.sync_window()
    }

    /// Re-reads the viewport and brings the visible set in line with it.
    ///
    /// The window is derived from the container's current offset alone, never from the
    /// previous window, so two syncs at the same offset always agree.
    pub fn sync_window(&mut self) -> WindowDelta {
        let Some(host) = &self.host else {
            rwarn!("sync_window on a destroyed renderer");
            return WindowDelta::default();
        };
        let Some(viewport) = host.target.viewport() else {
            rwarn!("sync_window: scroll container is detached");
            return WindowDelta::default();
        };

        self.scroll.viewport_height = viewport.height;
        self.scroll.scroll_top = self.scroll.clamp_scroll_top(viewport.scroll_top);
        let next = self.window_for(self.scroll.scroll_top);
        self.apply_window(next)
    }

    fn window_for(&self, scroll_top: u64) -> WindowRange {
        if !self.options.virtual_scroll {
            return WindowRange::new(0, self.row_count);
        }
        compute_window(
            scroll_top,
            self.scroll.viewport_height,
            self.options.row_height,
            self.options.buffer_size,
            self.row_count,
        )
    }

    fn apply_window(&mut self, next: WindowRange) -> WindowDelta {
        self.tick = self.tick.saturating_add(1);
        self.stats.window_syncs += 1;

        let stale: Vec<usize> = self
            .visible
            .range(..next.start_index)
            .chain(self.visible.range(next.end_index..))
            .copied()
            .collect();
        self.window = next;

        let mut delta = WindowDelta::default();
        for index in stale {
            if self.evict(index) {
                delta.evicted += 1;
            }
        }
        for index in next.iter() {
            if self.materialize(index) {
                delta.materialized += 1;
            }
        }
        self.stats.cache_pruned += self.cache.prune(&self.visible) as u64;

        debug_assert!(
            self.visible.iter().all(|&i| next.contains(i)),
            "visible row outside window {next:?}"
        );
        rtrace!(
            start = next.start_index,
            end = next.end_index,
            evicted = delta.evicted,
            materialized = delta.materialized,
            "window sync"
        );

        if !delta.is_empty() {
            if let Some(cb) = &self.options.on_window_change {
                cb(next, delta);
            }
        }
        delta
    }

    /// Shows the row at `index`, reusing its cached representation when there is one.
    ///
    /// Returns `false` without writing anything when the row is already visible, lies outside
    /// the current window or the table, or the live row is missing.
    pub fn materialize(&mut self, index: usize) -> bool {
        let Some(host) = self.host.as_mut() else {
            rwarn!(index, "materialize on a destroyed renderer");
            return false;
        };
        if index >= self.row_count || !self.window.contains(index) || self.visible.contains(&index)
        {
            return false;
        }

        let placement = RowPlacement::for_index(index, self.options.row_height);
        match self.cache.get(index) {
            Some(row) => {
                host.target.show_row(placement, row);
                self.stats.cache_hits += 1;
                self.cache.touch(index, self.tick);
            }
            None => {
                let Some(row) = host.source.render_row(index) else {
                    rwarn!(index, "materialize: row is missing from the table");
                    return false;
                };
                host.target.show_row(placement, &row);
                self.cache.insert(index, row, self.tick);
                self.stats.rows_built += 1;
            }
        }

        self.visible.insert(index);
        self.stats.materialized += 1;
        rtrace!(index, top = placement.top, "materialize");
        true
    }

    /// Hides the row at `index` and drops it from the visible set.
    ///
    /// The cached representation is kept for when the row re-enters the window. Returns
    /// `false` if the row was not visible.
    pub fn evict(&mut self, index: usize) -> bool {
        let Some(host) = self.host.as_mut() else {
            rwarn!(index, "evict on a destroyed renderer");
            return false;
        };
        if !self.visible.remove(&index) {
            return false;
        }

        host.target.hide_row(index);
        self.cache.touch(index, self.tick);
        self.stats.evicted += 1;
        rtrace!(index, "evict");
        true
    }

    /// Writes new field values into the row at `index`.
    ///
    /// Each `(field, value)` pair is written to the live row and to its cached representation,
    /// so a cached row never comes back stale. A visible row is refreshed in place; position
    /// and visibility are left alone. Fields the row doesn't have are skipped.
    ///
    /// Returns `true` if any field was written. An index outside the table is a no-op.
    pub fn update_row<I, F, V>(&mut self, index: usize, fields: I) -> bool
    where
        I: IntoIterator<Item = (F, V)>,
        F: AsRef<str>,
        V: AsRef<str>,
    {
        let Some(host) = self.host.as_mut() else {
            rwarn!(index, "update_row on a destroyed renderer");
            return false;
        };
        if index >= self.row_count {
            return false;
        }

        let mut cached = self.cache.get_mut(index);
        let mut changed = false;
        for (field, value) in fields {
            let (field, value) = (field.as_ref(), value.as_ref());
            let live = host.source.write_field(index, field, value);
            let cell = match cached.as_mut() {
                Some(row) => row.set_field(field, value),
                None => false,
            };
            changed |= live || cell;
        }

        if changed && self.visible.contains(&index) {
            if let Some(row) = self.cache.get(index) {
                host.target.refresh_row(index, row);
            }
        }
        rtrace!(index, changed, "update_row");
        changed
    }

    /// Adopts a new row count after the host collection grew or shrank.
    ///
    /// Recomputes total height and the spacer, then re-syncs the window against the current
    /// scroll offset (clamped to the new range). Visible rows and cache entries past the new
    /// end are dropped.
    pub fn resize(&mut self, row_count: usize) -> WindowDelta {
        let Some(host) = self.host.as_mut() else {
            rwarn!(row_count, "resize on a destroyed renderer");
            return WindowDelta::default();
        };

        rdebug!(from = self.row_count, to = row_count, "resize");
        self.row_count = row_count;
        self.scroll.total_height = total_height(row_count, self.options.row_height);
        if self.options.virtual_scroll {
            host.target.set_content_height(self.scroll.total_height);
        }

        let scroll_top = match host.target.viewport() {
            Some(viewport) => {
                self.scroll.viewport_height = viewport.height;
                viewport.scroll_top
            }
            None => self.scroll.scroll_top,
        };
        self.scroll.scroll_top = self.scroll.clamp_scroll_top(scroll_top);

        let delta = self.apply_window(self.window_for(self.scroll.scroll_top));
        self.cache.truncate(row_count);
        delta
    }

    /// Detaches from the container and drops all renderer state.
    ///
    /// Calling it again is a no-op.
    pub fn destroy(&mut self) {
        let Some(mut host) = self.host.take() else {
            return;
        };
        if self.listening {
            host.target.detach_scroll_listener();
            self.listening = false;
        }

        self.visible.clear();
        self.cache.clear();
        self.window = WindowRange::EMPTY;
        self.scroll_pending = false;
        rdebug!("WindowedRowRenderer::destroy");
    }
}

impl<S: RowSource, T> core::fmt::Debug for WindowedRowRenderer<S, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedRowRenderer")
            .field("options", &self.options)
            .field("row_count", &self.row_count)
            .field("scroll", &self.scroll)
            .field("window", &self.window)
            .field("visible", &self.visible.len())
            .field("cached", &self.cache.len())
            .field("destroyed", &self.host.is_none())
            .finish_non_exhaustive()
    }
}
