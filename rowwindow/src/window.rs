use crate::WindowRange;

/// Number of rows needed to cover `viewport_height`, rounding partial rows up.
pub fn rows_per_viewport(viewport_height: u32, row_height: u32) -> usize {
    if row_height == 0 {
        return 0;
    }
    viewport_height.div_ceil(row_height) as usize
}

/// Maps a scroll offset to the window of rows that must be materialized.
///
/// `start = floor(scroll_top / row_height)` and
/// `end = min(row_count, start + ceil(viewport_height / row_height) + buffer_size)`.
///
/// The mapping is pure: it depends only on its arguments, never on previous windows. Callers
/// are expected to clamp `scroll_top` to the scrollable range first; if they don't, `start` is
/// still clamped so that `start <= end <= row_count`.
pub fn compute_window(
    scroll_top: u64,
    viewport_height: u32,
    row_height: u32,
    buffer_size: usize,
    row_count: usize,
) -> WindowRange {
    if row_count == 0 || row_height == 0 {
        return WindowRange::EMPTY;
    }

    let first = scroll_top / row_height as u64;
    let start = usize::try_from(first).unwrap_or(usize::MAX);
    let span = rows_per_viewport(viewport_height, row_height).saturating_add(buffer_size);
    let end = start.saturating_add(span).min(row_count);

    WindowRange {
        start_index: start.min(end),
        end_index: end,
    }
}

/// Total scrollable height of `row_count` uniform rows.
pub fn total_height(row_count: usize, row_height: u32) -> u64 {
    (row_count as u64).saturating_mul(row_height as u64)
}
