//! Adapter utilities for the `rowwindow` crate.
//!
//! The `rowwindow` crate is UI-agnostic and owns the windowing state. This crate provides
//! small, framework-neutral helpers commonly needed around it:
//!
//! - Write coalescing per paint tick ([`StyleBatcher`])
//! - Frame-driven scrolling with one window sync per frame ([`Controller`])
//! - Named-channel events ([`EventBus`], [`TableEvent`])
//! - Cell text transforms routed through the row cache ([`EditAction`], [`apply_edit`])
//!
//! This crate is intentionally framework-agnostic (no DOM or TUI bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod batcher;
mod controller;
mod edit;
mod event;

#[cfg(test)]
mod tests;

pub use batcher::StyleBatcher;
pub use controller::{Controller, FrameOutcome};
pub use edit::{EditAction, apply_edit};
pub use event::{EventBus, SubscriptionId, TableEvent};
