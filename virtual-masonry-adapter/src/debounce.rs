/// A trailing-edge debounce timer for adapter-driven time.
///
/// This is the single cancellable scheduled-callback primitive used for scroll signals and
/// search input. It does not own a clock: callers pass `now_ms` from whatever timer source they
/// have (frame loop, `tokio::time`, a test counter).
///
/// `schedule` cancels any pending value and restarts the delay; `poll` yields the pending value
/// once its deadline has been reached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<Pending<T>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Pending<T> {
    value: T,
    deadline_ms: u64,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Changes the delay for values scheduled from now on.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Schedules `value` for delivery at `now_ms + delay_ms`, replacing any pending value.
    ///
    /// Returns `true` if a pending value was cancelled.
    pub fn schedule(&mut self, value: T, now_ms: u64) -> bool {
        let deadline_ms = now_ms.saturating_add(self.delay_ms);
        let replaced = self.pending.is_some();
        atrace!(now_ms, deadline_ms, replaced, "Debouncer::schedule");
        self.pending = Some(Pending { value, deadline_ms });
        replaced
    }

    /// Returns the pending value if its deadline has been reached.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|p| now_ms >= p.deadline_ms);
        if !due {
            return None;
        }
        self.pending.take().map(|p| p.value)
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Delivers the pending value immediately, regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.deadline_ms)
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|p| &p.value)
    }
}
