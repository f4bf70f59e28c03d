use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    FrameState, Geometry, Item, ItemKey, MasonryOptions, OnChangeCallback, Placement,
    ViewportWindow, column_count, for_each_placement,
};

/// A headless virtualized masonry grid.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - Your adapter drives it by providing container geometry and scroll offsets.
/// - Every change that affects placement triggers a full relayout; only the visible subset and
///   the total content height are retained.
///
/// For debounced scroll signals and a ready-made controller, see the `virtual-masonry-adapter`
/// crate.
#[derive(Clone, Debug)]
pub struct Masonry<K = ItemKey> {
    options: MasonryOptions<K>,
    items: Vec<Item<K>>,
    geometry: Geometry,
    scroll_offset: u64,

    columns: usize,
    visible: Vec<Placement<K>>,
    total_height: f64,
    skipped: usize,
    layout_count: u64,

    batch_depth: usize,
    relayout_pending: bool,
}

impl<K: Clone> Masonry<K> {
    /// Creates an empty grid from options.
    ///
    /// If `options.initial_frame` is set, its geometry and scroll offset are applied immediately.
    pub fn new(options: MasonryOptions<K>) -> Self {
        let frame = options.initial_frame.unwrap_or_default();
        mdebug!(
            item_width = options.item_width,
            gap = options.gap,
            overscan = options.overscan,
            "Masonry::new"
        );
        let mut m = Self {
            columns: column_count(frame.geometry.width, options.item_width, options.gap),
            options,
            items: Vec::new(),
            geometry: frame.geometry,
            scroll_offset: frame.scroll_offset,
            visible: Vec::new(),
            total_height: 0.0,
            skipped: 0,
            layout_count: 0,
            batch_depth: 0,
            relayout_pending: false,
        };
        m.relayout();
        m
    }

    pub fn options(&self) -> &MasonryOptions<K> {
        &self.options
    }

    pub fn set_options(&mut self, options: MasonryOptions<K>) {
        let changed = self.options.affects_layout(&options);
        self.options = options;
        mtrace!(
            item_width = self.options.item_width,
            gap = self.options.gap,
            overscan = self.options.overscan,
            enabled = self.options.enabled,
            "Masonry::set_options"
        );
        if changed {
            self.relayout();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut MasonryOptions<K>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Masonry<K>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| Arc::new(f) as OnChangeCallback<K>);
    }

    /// Runs several updates and performs at most one relayout at the end.
    ///
    /// Adapters receiving width, viewport height and scroll offset together should use this (or
    /// `apply_frame`) so the grid is not recomputed once per setter.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.batch_depth = self.batch_depth.saturating_add(1);

        f(self);

        debug_assert!(self.batch_depth > 0, "batch_depth underflow");
        self.batch_depth = self.batch_depth.saturating_sub(1);

        if self.batch_depth == 0 && core::mem::take(&mut self.relayout_pending) {
            self.relayout_now();
        }
    }

    fn relayout(&mut self) {
        if self.batch_depth > 0 {
            self.relayout_pending = true;
            return;
        }
        self.relayout_now();
    }

    fn relayout_now(&mut self) {
        let options = self.options.layout();
        let columns = column_count(self.geometry.width, options.item_width, options.gap);
        if columns != self.columns {
            mdebug!(from = self.columns, to = columns, "column count changed");
            self.columns = columns;
        }

        self.visible.clear();
        self.layout_count = self.layout_count.saturating_add(1);

        if !self.options.enabled {
            self.total_height = 0.0;
            self.skipped = 0;
            self.notify();
            return;
        }

        let window = self.window();
        let visible = &mut self.visible;
        let pass = for_each_placement(&self.items, options, columns, |p| {
            if window.intersects(p.top, p.height) {
                visible.push(p);
            }
        });
        self.total_height = pass.total_height();
        self.skipped = pass.skipped;

        mtrace!(
            items = self.items.len(),
            visible = self.visible.len(),
            columns,
            total_height = self.total_height,
            "relayout"
        );
        self.notify();
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    pub fn enabled(&self) -> bool {
        self.options.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.options.enabled == enabled {
            return;
        }
        self.options.enabled = enabled;
        self.relayout();
    }

    pub fn items(&self) -> &[Item<K>] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Replaces the item list.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item<K>>) {
        self.items.clear();
        self.items.extend(items);
        self.relayout();
    }

    /// Appends items (e.g. the next page of an infinite feed).
    pub fn extend_items(&mut self, items: impl IntoIterator<Item = Item<K>>) {
        let before = self.items.len();
        self.items.extend(items);
        if self.items.len() != before {
            self.relayout();
        }
    }

    pub fn clear_items(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.items.clear();
        self.relayout();
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        if self.geometry == geometry {
            return;
        }
        self.geometry = geometry;
        self.relayout();
    }

    pub fn set_container_width(&mut self, width: u32) {
        if self.geometry.width == width {
            return;
        }
        self.geometry.width = width;
        self.relayout();
    }

    pub fn set_viewport_extent(&mut self, extent: u32) {
        if self.geometry.height == extent {
            return;
        }
        self.geometry.height = extent;
        self.relayout();
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: u64) {
        if self.scroll_offset == offset {
            return;
        }
        self.scroll_offset = offset;
        self.relayout();
    }

    /// Same as `set_scroll_offset`, but keeps the offset within `0..=max_scroll_offset()`.
    pub fn set_scroll_offset_clamped(&mut self, offset: u64) {
        let clamped = offset.min(self.max_scroll_offset());
        self.set_scroll_offset(clamped);
    }

    pub fn set_viewport(&mut self, extent: u32, scroll_offset: u64) {
        self.batch_update(|m| {
            m.set_viewport_extent(extent);
            m.set_scroll_offset(scroll_offset);
        });
    }

    /// Applies geometry and scroll offset in a single coalesced relayout.
    ///
    /// This is the recommended entry point for adapters that receive scroll events along with
    /// updated container dimensions.
    pub fn apply_frame(&mut self, frame: FrameState) {
        mtrace!(
            width = frame.geometry.width,
            height = frame.geometry.height,
            scroll_offset = frame.scroll_offset,
            "apply_frame"
        );
        self.batch_update(|m| {
            m.set_geometry(frame.geometry);
            m.set_scroll_offset(frame.scroll_offset);
        });
    }

    /// Returns a lightweight snapshot of the current geometry and scroll offset.
    pub fn frame_state(&self) -> FrameState {
        FrameState::new(self.geometry, self.scroll_offset)
    }

    /// Restores geometry and scroll offset from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.apply_frame(frame);
    }

    pub fn set_item_width(&mut self, item_width: u32) {
        if self.options.item_width == item_width {
            return;
        }
        self.options.item_width = item_width;
        self.relayout();
    }

    pub fn set_gap(&mut self, gap: u32) {
        if self.options.gap == gap {
            return;
        }
        self.options.gap = gap;
        self.relayout();
    }

    pub fn set_overscan(&mut self, overscan: u32) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.relayout();
    }

    /// The viewport window used by the last relayout.
    pub fn window(&self) -> ViewportWindow {
        ViewportWindow::new(self.scroll_offset, self.geometry.height, self.options.overscan)
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Placements intersecting the viewport window, in input order.
    pub fn visible_items(&self) -> &[Placement<K>] {
        &self.visible
    }

    pub fn for_each_visible_item(&self, mut f: impl FnMut(&Placement<K>)) {
        for p in &self.visible {
            f(p);
        }
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    /// The largest scroll offset that still shows content at the bottom of the viewport.
    pub fn max_scroll_offset(&self) -> u64 {
        let total = self.total_height as u64;
        total.saturating_sub(self.geometry.height as u64)
    }

    /// Number of malformed items left out by the last relayout.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of full relayouts performed so far.
    pub fn layout_count(&self) -> u64 {
        self.layout_count
    }

    /// Finds the visible item under a point in content coordinates (e.g. a click).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Placement<K>> {
        self.visible.iter().find(|p| p.contains(x, y))
    }

    pub fn visible_item_for_key(&self, key: &K) -> Option<&Placement<K>>
    where
        K: PartialEq,
    {
        self.visible.iter().find(|p| &p.key == key)
    }
}
