use alloc::boxed::Box;
use core::fmt;

use virtual_masonry::{FrameState, Geometry};

use crate::Debouncer;

pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 100;
pub const DEFAULT_SCROLL_THRESHOLD_PX: u32 = 5;

/// The scroll context a grid lives in: the window, or a dedicated scrollable container.
///
/// Adapters implement this for whatever owns the real scroll position. The signal source reads it
/// on every event and again at delivery time, so it never works from a stale snapshot.
pub trait ScrollContext {
    /// Current container width and viewport height.
    fn geometry(&self) -> Geometry;

    /// Current vertical scroll offset.
    fn scroll_offset(&self) -> u64;

    fn frame(&self) -> FrameState {
        FrameState::new(self.geometry(), self.scroll_offset())
    }
}

impl<C: ScrollContext + ?Sized> ScrollContext for Box<C> {
    fn geometry(&self) -> Geometry {
        (**self).geometry()
    }

    fn scroll_offset(&self) -> u64 {
        (**self).scroll_offset()
    }
}

/// A scroll context whose geometry and offset are set explicitly.
///
/// Useful for headless rendering and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticContext {
    pub geometry: Geometry,
    pub scroll_offset: u64,
}

impl StaticContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            geometry: Geometry::new(width, height),
            scroll_offset: 0,
        }
    }

    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.geometry = Geometry::new(width, height);
    }
}

impl ScrollContext for StaticContext {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignalOptions {
    /// Quiet period before a qualifying event is delivered.
    pub debounce_ms: u64,
    /// Events that move the offset, extent and width by less than this are dropped.
    pub threshold_px: u32,
}

impl Default for SignalOptions {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
            threshold_px: DEFAULT_SCROLL_THRESHOLD_PX,
        }
    }
}

impl SignalOptions {
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_threshold_px(mut self, threshold_px: u32) -> Self {
        self.threshold_px = threshold_px;
        self
    }
}

/// What `ScrollSignal::on_event` did with a raw scroll/resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventOutcome {
    /// The change since the last delivery is below the threshold.
    Suppressed,
    /// Delivery is (re)scheduled for `deadline_ms`.
    Scheduled { deadline_ms: u64 },
    /// The signal has no listener registered.
    Ignored,
}

pub type SignalCallback = Box<dyn FnMut(u64, u32)>;

/// Turns raw scroll/resize events into thresholded, debounced deliveries.
///
/// The signal remembers the last delivered frame. Events that barely move it are suppressed; the
/// rest are debounced on the trailing edge, and each delivery reads the scroll context afresh.
pub struct ScrollSignal<C> {
    context: C,
    options: SignalOptions,
    last_delivered: FrameState,
    timer: Debouncer<FrameState>,
    callback: Option<SignalCallback>,
    active: bool,
    delivered: u64,
}

impl<C: ScrollContext> ScrollSignal<C> {
    /// Creates an active signal. The context's current frame counts as already delivered.
    pub fn new(context: C, options: SignalOptions) -> Self {
        let last_delivered = context.frame();
        Self {
            context,
            timer: Debouncer::new(options.debounce_ms),
            options,
            last_delivered,
            callback: None,
            active: true,
            delivered: 0,
        }
    }

    pub fn options(&self) -> SignalOptions {
        self.options
    }

    pub fn set_options(&mut self, options: SignalOptions) {
        self.options = options;
        self.timer.set_delay_ms(options.debounce_ms);
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Mutable access for adapters that move the real scroll position.
    ///
    /// Call `on_event` afterwards so the change is picked up.
    pub fn context_mut(&mut self) -> &mut C {
        &mut self.context
    }

    pub fn last_delivered(&self) -> FrameState {
        self.last_delivered
    }

    /// Number of deliveries so far.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Registers `callback(scroll_offset, viewport_extent)` and (re)activates the signal.
    pub fn subscribe(&mut self, callback: impl FnMut(u64, u32) + 'static) {
        self.callback = Some(Box::new(callback));
        self.active = true;
    }

    /// Removes the listener and cancels any pending delivery.
    pub fn unsubscribe(&mut self) {
        self.callback = None;
        self.active = false;
        if self.timer.cancel().is_some() {
            adebug!("ScrollSignal: pending delivery cancelled");
        }
    }

    /// Handles a raw scroll or resize event observed at `now_ms`.
    pub fn on_event(&mut self, now_ms: u64) -> EventOutcome {
        if !self.active {
            return EventOutcome::Ignored;
        }
        let frame = self.context.frame();
        if !self.exceeds_threshold(frame) {
            atrace!(
                scroll_offset = frame.scroll_offset,
                extent = frame.geometry.height,
                "ScrollSignal: below threshold"
            );
            return EventOutcome::Suppressed;
        }
        self.timer.schedule(frame, now_ms);
        EventOutcome::Scheduled {
            deadline_ms: now_ms.saturating_add(self.options.debounce_ms),
        }
    }

    fn exceeds_threshold(&self, frame: FrameState) -> bool {
        let threshold = self.options.threshold_px as u64;
        let last = self.last_delivered;
        frame.scroll_offset.abs_diff(last.scroll_offset) >= threshold
            || (frame.geometry.height as u64).abs_diff(last.geometry.height as u64) >= threshold
            || (frame.geometry.width as u64).abs_diff(last.geometry.width as u64) >= threshold
    }

    /// Delivers the pending event if its debounce deadline has passed.
    ///
    /// The delivered frame is read from the context now, not the one sampled when the event was
    /// scheduled.
    pub fn tick(&mut self, now_ms: u64) -> Option<FrameState> {
        self.timer.poll(now_ms)?;
        Some(self.deliver())
    }

    /// Delivers the pending event immediately, if any.
    pub fn flush(&mut self) -> Option<FrameState> {
        self.timer.flush()?;
        Some(self.deliver())
    }

    fn deliver(&mut self) -> FrameState {
        let frame = self.context.frame();
        self.last_delivered = frame;
        self.delivered = self.delivered.saturating_add(1);
        adebug!(
            scroll_offset = frame.scroll_offset,
            extent = frame.geometry.height,
            width = frame.geometry.width,
            "ScrollSignal: deliver"
        );
        if let Some(cb) = self.callback.as_mut() {
            cb(frame.scroll_offset, frame.geometry.height);
        }
        frame
    }

    /// Cancels timers and drops the listener; the signal ignores events afterwards.
    pub fn teardown(&mut self) {
        self.unsubscribe();
    }
}

impl<C: fmt::Debug> fmt::Debug for ScrollSignal<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollSignal")
            .field("context", &self.context)
            .field("options", &self.options)
            .field("last_delivered", &self.last_delivered)
            .field("timer", &self.timer)
            .field("subscribed", &self.callback.is_some())
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}
