//! A headless windowed row renderer for large scrollable tables.
//!
//! For adapter-level utilities (write batching, frame-driven control, events, edit actions),
//! see the `rowwindow-adapter` crate.
//!
//! The renderer keeps a table with any number of uniform-height rows scrollable at a constant
//! per-frame cost: only the rows intersecting the viewport, plus a fixed buffer, are
//! materialized. Rows that scroll out of range are hidden but their representations are
//! cached, so a row that scrolls back in is shown again without being rebuilt.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - the row collection ([`RowSource`])
//! - a scroll container that reports its viewport and accepts row writes ([`RenderTarget`])
//! - scroll notifications ([`WindowedRowRenderer::on_scroll`])
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod error;
mod options;
mod renderer;
mod state;
mod target;
mod types;
mod window;


pub use error::Error;
pub use options::{RendererOptions, WindowChangeCallback};
pub use renderer::WindowedRowRenderer;
pub use state::{RendererStats, ScrollState};
pub use target::{RenderTarget, RowContent, RowSource};
pub use types::{RowPlacement, Viewport, WindowDelta, WindowRange};
pub use window::{compute_window, rows_per_viewport, total_height};
