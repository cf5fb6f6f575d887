/// A lightweight snapshot of the renderer's scroll geometry.
///
/// `total_height` is `row_count * row_height` as of `init` (or the last `resize`); it is not
/// tracked against later changes to the host's row collection.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    /// The last applied (clamped) scroll offset.
    pub scroll_top: u64,
    pub viewport_height: u32,
    pub total_height: u64,
}

impl ScrollState {
    /// The largest scroll offset that still shows a full viewport of content.
    pub fn max_scroll_top(&self) -> u64 {
        self.total_height.saturating_sub(self.viewport_height as u64)
    }

    pub fn clamp_scroll_top(&self, scroll_top: u64) -> u64 {
        scroll_top.min(self.max_scroll_top())
    }
}

/// Counters describing the work a renderer has done since `init`.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RendererStats {
    /// Representations produced from live rows (cache misses).
    pub rows_built: u64,
    /// Materializations served from the row cache.
    pub cache_hits: u64,
    pub materialized: u64,
    pub evicted: u64,
    /// Cache entries dropped by the capacity bound.
    pub cache_pruned: u64,
    pub window_syncs: u64,
    /// Scroll notifications folded into a later frame sync.
    pub coalesced_scrolls: u64,
}
