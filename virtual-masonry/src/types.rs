pub type ItemKey = u64;

/// An item to lay out: a stable identity plus its intrinsic pixel size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K = ItemKey> {
    pub key: K,
    /// Intrinsic width in pixels.
    pub width: u32,
    /// Intrinsic height in pixels.
    pub height: u32,
}

impl<K> Item<K> {
    pub fn new(key: K, width: u32, height: u32) -> Self {
        Self { key, width, height }
    }

    /// Returns `false` for items with a zero width or height (they cannot be placed).
    pub fn is_well_formed(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn aspect_ratio(&self) -> Option<f64> {
        if !self.is_well_formed() {
            return None;
        }
        Some(self.width as f64 / self.height as f64)
    }

    /// Height of this item when rendered `item_width` pixels wide.
    pub fn scaled_height(&self, item_width: u32) -> Option<f64> {
        self.aspect_ratio().map(|ratio| item_width as f64 / ratio)
    }
}

/// The computed rectangle for one item within one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement<K = ItemKey> {
    pub key: K,
    /// Position of the item in the input sequence.
    pub index: usize,
    pub column: usize,
    pub top: f64,
    pub left: u32,
    pub width: u32,
    pub height: f64,
}

impl<K> Placement<K> {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> u32 {
        self.left.saturating_add(self.width)
    }

    /// Whether the point (`x`, `y`) falls inside this rectangle (edges inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left as f64 && x <= self.right() as f64 && y >= self.top && y <= self.bottom()
    }
}

/// The scroll-relative range of pixels considered visible, plus an overscan buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow {
    pub scroll_offset: u64,
    pub viewport_extent: u32,
    /// Extra pixels included above and below the viewport.
    pub overscan: u32,
}

/// A closed vertical interval `[start, end]` in content coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowRange {
    pub start: f64,
    pub end: f64,
}

impl ViewportWindow {
    pub fn new(scroll_offset: u64, viewport_extent: u32, overscan: u32) -> Self {
        Self {
            scroll_offset,
            viewport_extent,
            overscan,
        }
    }

    /// The inclusion range `[scroll_offset - overscan, scroll_offset + extent + overscan]`.
    ///
    /// The start may be negative near the top of the content.
    pub fn range(&self) -> WindowRange {
        let offset = self.scroll_offset as f64;
        let overscan = self.overscan as f64;
        WindowRange {
            start: offset - overscan,
            end: offset + self.viewport_extent as f64 + overscan,
        }
    }

    /// Whether the span `[top, top + height]` intersects the inclusion range.
    pub fn intersects(&self, top: f64, height: f64) -> bool {
        let range = self.range();
        top + height >= range.start && top <= range.end
    }
}
