//! Search query and recent-search history.

/// Maximum number of remembered searches.
pub const RECENT_SEARCH_LIMIT: usize = 10;

/// Live query plus history, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// The query currently typed in the search box.
    pub query: String,
    recent: Vec<String>,
}

impl SearchState {
    /// Build from a restored history. Duplicates keep their first (most recent)
    /// position and the result is capped at [`RECENT_SEARCH_LIMIT`].
    pub fn from_recent(recent: impl IntoIterator<Item = String>) -> Self {
        let mut history: Vec<String> = Vec::new();
        for q in recent {
            if !history.contains(&q) {
                history.push(q);
            }
        }
        history.truncate(RECENT_SEARCH_LIMIT);
        Self {
            query: String::new(),
            recent: history,
        }
    }

    pub fn recent(&self) -> &[String] {
        &self.recent
    }

    /// Record a submitted search at the head of the history.
    pub fn push_recent(&mut self, query: String) {
        self.recent.retain(|q| *q != query);
        self.recent.insert(0, query);
        self.recent.truncate(RECENT_SEARCH_LIMIT);
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_repeat_moves_to_front() {
        let mut search = SearchState::default();
        search.push_recent("btc".to_string());
        search.push_recent("eth".to_string());
        search.push_recent("sol".to_string());
        search.push_recent("btc".to_string());
        assert_eq!(search.recent(), ["btc", "sol", "eth"]);
    }

    #[test]
    fn test_history_is_capped() {
        let mut search = SearchState::default();
        for i in 0..15 {
            search.push_recent(format!("q{i}"));
        }
        assert_eq!(search.recent().len(), RECENT_SEARCH_LIMIT);
        assert_eq!(search.recent()[0], "q14");
        assert_eq!(search.recent()[9], "q5");
    }

    #[test]
    fn test_query_does_not_touch_history() {
        let mut search = SearchState::default();
        search.query = "mean reversion".to_string();
        assert!(search.recent().is_empty());
    }

    #[test]
    fn test_from_recent_normalises() {
        let restored = (0..12).map(|i| format!("q{}", i % 11));
        let search = SearchState::from_recent(restored);
        assert_eq!(search.recent().len(), RECENT_SEARCH_LIMIT);
        assert_eq!(search.recent()[0], "q0");
    }
}
