//! The seams between the renderer and its host.
//!
//! The renderer never touches a document directly. The host table is reached through
//! [`RowSource`], and every visual side effect (row position, visibility, the spacer that sizes
//! the scrollbar) goes through a [`RenderTarget`]. Tests drive the renderer with in-memory
//! implementations of both.

use crate::{RowPlacement, Viewport};

/// A rendered row whose cells are addressable by a field marker.
pub trait RowContent {
    /// Replaces the text of the cell marked `field`.
    ///
    /// Returns `false` when the row has no such cell.
    fn set_field(&mut self, field: &str, value: &str) -> bool;
}

/// The host-owned, ordered row collection.
///
/// Rows are borrowed by index; the renderer never owns them.
pub trait RowSource {
    /// The representation the renderer caches and hands to its [`RenderTarget`].
    type Row: RowContent;

    fn row_count(&self) -> usize;

    /// Produces a fresh representation of the live row at `index`.
    ///
    /// Returns `None` when the row no longer exists (for example, it was removed from the
    /// document after `init`).
    fn render_row(&self, index: usize) -> Option<Self::Row>;

    /// Writes `value` into the cell marked `field` of the live row.
    ///
    /// Returns `false` when the row or the cell is missing.
    fn write_field(&mut self, index: usize, field: &str, value: &str) -> bool;
}

/// The scroll container and the element rows are drawn into.
pub trait RenderTarget<R> {
    /// Current scroll offset and client height, or `None` if the container is gone.
    fn viewport(&self) -> Option<Viewport>;

    /// Sizes the spacer so the scrollbar reflects the full logical table.
    fn set_content_height(&mut self, height: u64);

    /// Positions `row` at `placement` and makes it visible.
    fn show_row(&mut self, placement: RowPlacement, row: &R);

    /// Hides the row at `index`. The row keeps its content.
    fn hide_row(&mut self, index: usize);

    /// Replaces the content of a visible row without moving or hiding it.
    fn refresh_row(&mut self, index: usize, row: &R);

    fn attach_scroll_listener(&mut self) {}

    fn detach_scroll_listener(&mut self) {}
}

impl<R, T: RenderTarget<R> + ?Sized> RenderTarget<R> for &mut T {
    fn viewport(&self) -> Option<Viewport> {
        (**self).viewport()
    }

    fn set_content_height(&mut self, height: u64) {
        (**self).set_content_height(height);
    }

    fn show_row(&mut self, placement: RowPlacement, row: &R) {
        (**self).show_row(placement, row);
    }

    fn hide_row(&mut self, index: usize) {
        (**self).hide_row(index);
    }

    fn refresh_row(&mut self, index: usize, row: &R) {
        (**self).refresh_row(index, row);
    }

    fn attach_scroll_listener(&mut self) {
        (**self).attach_scroll_listener();
    }

    fn detach_scroll_listener(&mut self) {
        (**self).detach_scroll_listener();
    }
}
