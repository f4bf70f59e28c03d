//! Adapter utilities for the `virtual-masonry` crate.
//!
//! The `virtual-masonry` crate is UI-agnostic and focuses on the layout math and state. This
//! crate provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - A trailing-edge debounce primitive driven by adapter-supplied timestamps
//! - A thresholded, debounced scroll/resize signal over an injected scroll context
//! - A controller wiring the signal into a `Masonry` grid
//! - The infinite-scroll "load more" trigger
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod debounce;
mod infinite;
mod signal;


pub use controller::Controller;
pub use debounce::Debouncer;
pub use infinite::{DEFAULT_LOAD_MORE_THRESHOLD_PX, LoadMoreProbe, should_load_more};
pub use signal::{
    DEFAULT_SCROLL_DEBOUNCE_MS, DEFAULT_SCROLL_THRESHOLD_PX, EventOutcome, ScrollContext,
    ScrollSignal, SignalCallback, SignalOptions, StaticContext,
};
