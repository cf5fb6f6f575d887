/// A half-open range of row indices: `[start_index, end_index)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index < self.end_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index.max(self.start_index)
    }
}

/// Where a materialized row is drawn.
///
/// Rows are positioned absolutely inside the scroll content and span its full width, so only
/// the vertical axis is described.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowPlacement {
    pub index: usize,
    /// Absolute offset from the top of the scroll content (`index * row_height`).
    pub top: u64,
    pub height: u32,
}

impl RowPlacement {
    pub fn for_index(index: usize, row_height: u32) -> Self {
        Self {
            index,
            top: (index as u64).saturating_mul(row_height as u64),
            height: row_height,
        }
    }

    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height as u64)
    }
}

/// Geometry reported by the scroll container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub scroll_top: u64,
    /// Client height of the container.
    pub height: u32,
}

/// Write counts produced by a single window sync.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowDelta {
    pub evicted: usize,
    pub materialized: usize,
}

impl WindowDelta {
    pub fn is_empty(&self) -> bool {
        self.evicted == 0 && self.materialized == 0
    }

    pub fn writes(&self) -> usize {
        self.evicted + self.materialized
    }
}
