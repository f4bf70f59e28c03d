//! A headless virtualized masonry layout engine.
//!
//! For adapter-level utilities (debouncing, scroll/resize signals, a controller), see the
//! `virtual-masonry-adapter` crate.
//!
//! This crate focuses on the core algorithm needed to render large photo grids at interactive
//! frame rates: greedy shortest-column placement that preserves each item's aspect ratio, and
//! viewport-window filtering so only the items near the visible area are rendered.
//!
//! It is UI-agnostic. A GUI/TUI/web layer is expected to provide:
//! - the container width and viewport height
//! - the scroll offset
//! - the intrinsic size of every item
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod column;
mod layout;
mod masonry;
mod options;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use column::{ColumnState, column_count};
pub use layout::{Layout, Pass, compute_layout, for_each_placement};
pub use masonry::Masonry;
pub use options::{
    DEFAULT_GAP, DEFAULT_ITEM_WIDTH, DEFAULT_OVERSCAN, LayoutOptions, MasonryOptions,
    OnChangeCallback,
};
pub use state::{FrameState, Geometry};
pub use types::{Item, ItemKey, Placement, ViewportWindow, WindowRange};
