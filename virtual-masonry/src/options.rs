use alloc::sync::Arc;

use crate::masonry::Masonry;
use crate::{FrameState, ItemKey};

pub const DEFAULT_ITEM_WIDTH: u32 = 300;
pub const DEFAULT_GAP: u32 = 20;
pub const DEFAULT_OVERSCAN: u32 = 100;

/// A callback fired after every full relayout.
///
/// This is the observability hook for adapters: it receives the engine with its freshly computed
/// visible items and total height.
pub type OnChangeCallback<K> = Arc<dyn Fn(&Masonry<K>) + Send + Sync>;

/// Fixed per-pass geometry for [`crate::compute_layout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOptions {
    /// Rendered width of every item.
    pub item_width: u32,
    /// Space between columns and between items stacked in a column.
    pub gap: u32,
}

impl LayoutOptions {
    pub fn new(item_width: u32, gap: u32) -> Self {
        Self { item_width, gap }
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_WIDTH, DEFAULT_GAP)
    }
}

/// Configuration for [`crate::Masonry`].
pub struct MasonryOptions<K = ItemKey> {
    pub item_width: u32,
    pub gap: u32,
    /// Extra pixels above and below the viewport whose items are still rendered.
    pub overscan: u32,

    /// Enables/disables the engine. When disabled, no items are visible and the total height is 0.
    pub enabled: bool,

    /// Geometry and scroll offset applied by `Masonry::new`.
    pub initial_frame: Option<FrameState>,

    /// Optional callback fired after every relayout.
    pub on_change: Option<OnChangeCallback<K>>,
}

impl<K> Clone for MasonryOptions<K> {
    fn clone(&self) -> Self {
        Self {
            item_width: self.item_width,
            gap: self.gap,
            overscan: self.overscan,
            enabled: self.enabled,
            initial_frame: self.initial_frame,
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> Default for MasonryOptions<K> {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_WIDTH, DEFAULT_GAP)
    }
}

impl<K> MasonryOptions<K> {
    pub fn new(item_width: u32, gap: u32) -> Self {
        Self {
            item_width,
            gap,
            overscan: DEFAULT_OVERSCAN,
            enabled: true,
            initial_frame: None,
            on_change: None,
        }
    }

    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions::new(self.item_width, self.gap)
    }

    pub fn with_item_width(mut self, item_width: u32) -> Self {
        self.item_width = item_width;
        self
    }

    pub fn with_gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_overscan(mut self, overscan: u32) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_initial_frame(mut self, initial_frame: Option<FrameState>) -> Self {
        self.initial_frame = initial_frame;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&Masonry<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as OnChangeCallback<K>);
        self
    }

    /// Whether switching from `self` to `other` invalidates the current placements.
    pub(crate) fn affects_layout(&self, other: &Self) -> bool {
        self.item_width != other.item_width
            || self.gap != other.gap
            || self.overscan != other.overscan
            || self.enabled != other.enabled
    }
}

impl<K> core::fmt::Debug for MasonryOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MasonryOptions")
            .field("item_width", &self.item_width)
            .field("gap", &self.gap)
            .field("overscan", &self.overscan)
            .field("enabled", &self.enabled)
            .field("initial_frame", &self.initial_frame)
            .finish_non_exhaustive()
    }
}
