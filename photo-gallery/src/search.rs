//! Debounced search box state.

use virtual_masonry_adapter::Debouncer;

use crate::config::DEFAULT_SEARCH_DEBOUNCE_MS;

/// The raw value of a search box plus the debounced term the gallery is showing.
///
/// Typing updates `value` immediately; the term is committed once input has been quiet for the
/// debounce delay and it differs from the committed one. A blank term means the curated feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    value: String,
    committed: String,
    timer: Debouncer<String>,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_DEBOUNCE_MS)
    }
}

impl SearchInput {
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            value: String::new(),
            committed: String::new(),
            timer: Debouncer::new(debounce_ms),
        }
    }

    /// What the user has typed so far.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The last term handed to the gallery, trimmed.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// The committed term as a query, `None` for the curated feed.
    pub fn query(&self) -> Option<&str> {
        (!self.committed.is_empty()).then_some(self.committed.as_str())
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.timer.deadline_ms()
    }

    /// Records a keystroke at `now_ms`, restarting the debounce delay.
    pub fn on_input(&mut self, value: impl Into<String>, now_ms: u64) {
        self.value = value.into();
        self.timer.schedule(self.value.clone(), now_ms);
    }

    /// Returns the newly committed term once the delay has elapsed, if it changed.
    pub fn tick(&mut self, now_ms: u64) -> Option<String> {
        let term = self.timer.poll(now_ms)?;
        self.commit(term)
    }

    /// Commits the pending value right away (e.g. on Enter).
    pub fn submit(&mut self) -> Option<String> {
        let term = self.timer.flush()?;
        self.commit(term)
    }

    fn commit(&mut self, term: String) -> Option<String> {
        let term = term.trim();
        if term == self.committed {
            return None;
        }
        tracing::debug!(term, "Search term committed");
        self.committed = term.to_string();
        Some(self.committed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commits_after_quiet_period() {
        let mut input = SearchInput::default();
        input.on_input("c", 0);
        input.on_input("ca", 100);
        input.on_input("cat", 200);
        assert_eq!(input.value(), "cat");
        assert_eq!(input.tick(650), None);
        assert_eq!(input.tick(700), Some("cat".to_string()));
        assert_eq!(input.committed(), "cat");
        assert_eq!(input.query(), Some("cat"));
        assert_eq!(input.tick(2_000), None);
    }

    #[test]
    fn test_unchanged_term_is_not_recommitted() {
        let mut input = SearchInput::new(10);
        input.on_input("dogs", 0);
        assert_eq!(input.tick(10), Some("dogs".to_string()));

        input.on_input("dogs ", 20);
        assert_eq!(input.tick(30), None);
        assert!(!input.is_pending());
    }

    #[test]
    fn test_clearing_returns_to_curated() {
        let mut input = SearchInput::new(10);
        input.on_input("sea", 0);
        input.tick(10);

        input.on_input("   ", 20);
        assert_eq!(input.tick(30), Some(String::new()));
        assert_eq!(input.query(), None);
    }

    #[test]
    fn test_submit_skips_the_delay() {
        let mut input = SearchInput::new(500);
        input.on_input("forest", 0);
        assert_eq!(input.deadline_ms(), Some(500));
        assert_eq!(input.submit(), Some("forest".to_string()));
        assert_eq!(input.tick(500), None);
    }
}
