use virtual_masonry::{FrameState, Item, Masonry, MasonryOptions};

use crate::{
    EventOutcome, LoadMoreProbe, ScrollContext, ScrollSignal, SignalOptions, should_load_more,
};

/// A framework-neutral controller that wraps a `virtual_masonry::Masonry` and the scroll signal
/// feeding it.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick(now_ms)` each frame/timer tick, which applies debounced deliveries to the grid
#[derive(Debug)]
pub struct Controller<K, C> {
    m: Masonry<K>,
    signal: ScrollSignal<C>,
}

impl<K: Clone, C: ScrollContext> Controller<K, C> {
    /// Creates a grid laid out for the context's current frame.
    pub fn new(options: MasonryOptions<K>, context: C, signal_options: SignalOptions) -> Self {
        let frame = context.frame();
        let m = Masonry::new(options.with_initial_frame(Some(frame)));
        Self {
            m,
            signal: ScrollSignal::new(context, signal_options),
        }
    }

    pub fn from_parts(mut m: Masonry<K>, signal: ScrollSignal<C>) -> Self {
        m.apply_frame(signal.context().frame());
        Self { m, signal }
    }

    pub fn masonry(&self) -> &Masonry<K> {
        &self.m
    }

    pub fn masonry_mut(&mut self) -> &mut Masonry<K> {
        &mut self.m
    }

    pub fn into_masonry(self) -> Masonry<K> {
        self.m
    }

    pub fn signal(&self) -> &ScrollSignal<C> {
        &self.signal
    }

    pub fn signal_mut(&mut self) -> &mut ScrollSignal<C> {
        &mut self.signal
    }

    pub fn context(&self) -> &C {
        self.signal.context()
    }

    pub fn context_mut(&mut self) -> &mut C {
        self.signal.context_mut()
    }

    /// Call this when the scroll context reports a scroll.
    pub fn on_scroll(&mut self, now_ms: u64) -> EventOutcome {
        self.signal.on_event(now_ms)
    }

    /// Call this when the scroll context reports a resize.
    pub fn on_resize(&mut self, now_ms: u64) -> EventOutcome {
        self.signal.on_event(now_ms)
    }

    /// Advances the controller.
    ///
    /// If a debounced delivery is due, applies it to the grid in one relayout and returns it.
    pub fn tick(&mut self, now_ms: u64) -> Option<FrameState> {
        let frame = self.signal.tick(now_ms)?;
        self.m.apply_frame(frame);
        Some(frame)
    }

    /// Applies any pending delivery immediately.
    pub fn flush(&mut self) -> Option<FrameState> {
        let frame = self.signal.flush()?;
        self.m.apply_frame(frame);
        Some(frame)
    }

    pub fn set_items(&mut self, items: impl IntoIterator<Item = Item<K>>) {
        self.m.set_items(items);
    }

    pub fn extend_items(&mut self, items: impl IntoIterator<Item = Item<K>>) {
        self.m.extend_items(items);
    }

    /// Infinite-scroll check against the grid's current frame and content height.
    pub fn should_load_more(&self, threshold_px: u32, loading: bool, has_more: bool) -> bool {
        let frame = self.m.frame_state();
        should_load_more(LoadMoreProbe {
            scroll_offset: frame.scroll_offset,
            viewport_extent: frame.geometry.height,
            content_height: self.m.total_height(),
            threshold_px,
            loading,
            has_more,
        })
    }

    /// Stops listening and cancels pending timers. The grid keeps its last layout.
    pub fn teardown(&mut self) {
        self.signal.teardown();
    }
}
