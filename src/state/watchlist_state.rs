//! User-created watchlists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named, ordered collection of strategy ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watchlist {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Strategy ids, in the order they were added.
    #[serde(default)]
    pub strategy_ids: Vec<String>,
    /// Creation time.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Watchlist {
    /// Create an empty watchlist with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            strategy_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Replace the generated id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn contains(&self, strategy_id: &str) -> bool {
        self.strategy_ids.iter().any(|s| s == strategy_id)
    }

    fn add(&mut self, strategy_id: String) {
        if !self.contains(&strategy_id) {
            self.strategy_ids.push(strategy_id);
        }
    }

    fn remove(&mut self, strategy_id: &str) {
        self.strategy_ids.retain(|s| s != strategy_id);
    }

    fn dedup(&mut self) {
        let mut seen = Vec::with_capacity(self.strategy_ids.len());
        self.strategy_ids.retain(|s| {
            if seen.contains(s) {
                false
            } else {
                seen.push(s.clone());
                true
            }
        });
    }
}

/// All watchlists, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchlistState {
    lists: Vec<Watchlist>,
}

impl WatchlistState {
    /// Build from restored watchlists. Later lists reusing an id are dropped.
    pub fn from_lists(lists: impl IntoIterator<Item = Watchlist>) -> Self {
        let mut state = Self::default();
        for mut list in lists {
            list.dedup();
            state.create(list);
        }
        state
    }

    pub fn lists(&self) -> &[Watchlist] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Watchlist> {
        self.lists.iter().find(|w| w.id == id)
    }

    /// Watchlists that hold the given strategy.
    pub fn containing<'a>(&'a self, strategy_id: &'a str) -> impl Iterator<Item = &'a Watchlist> {
        self.lists.iter().filter(move |w| w.contains(strategy_id))
    }

    /// Append a watchlist. An id already in use is a no-op.
    pub fn create(&mut self, watchlist: Watchlist) {
        if self.get(&watchlist.id).is_none() {
            self.lists.push(watchlist);
        }
    }

    pub fn delete(&mut self, id: &str) {
        self.lists.retain(|w| w.id != id);
    }

    pub fn rename(&mut self, id: &str, name: String) {
        if let Some(list) = self.get_mut(id) {
            list.name = name;
        }
    }

    pub fn add_strategy(&mut self, id: &str, strategy_id: String) {
        if let Some(list) = self.get_mut(id) {
            list.add(strategy_id);
        }
    }

    pub fn remove_strategy(&mut self, id: &str, strategy_id: &str) {
        if let Some(list) = self.get_mut(id) {
            list.remove(strategy_id);
        }
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Watchlist> {
        self.lists.iter_mut().find(|w| w.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state_with(id: &str) -> WatchlistState {
        let mut state = WatchlistState::default();
        state.create(Watchlist::new("Momentum").with_id(id));
        state
    }

    #[test]
    fn test_add_to_missing_watchlist_is_noop() {
        let mut state = WatchlistState::default();
        state.add_strategy("w1", "s5".to_string());
        assert!(state.is_empty());

        let mut state = state_with("w2");
        let before = state.clone();
        state.add_strategy("w1", "s5".to_string());
        assert_eq!(state, before);
    }

    #[test]
    fn test_add_and_remove_strategy() {
        let mut state = state_with("w1");
        state.add_strategy("w1", "s1".to_string());
        state.add_strategy("w1", "s2".to_string());
        state.add_strategy("w1", "s1".to_string());
        assert_eq!(state.get("w1").unwrap().strategy_ids, ["s1", "s2"]);

        state.remove_strategy("w1", "s1");
        assert_eq!(state.get("w1").unwrap().strategy_ids, ["s2"]);
    }

    #[test]
    fn test_duplicate_id_not_created() {
        let mut state = state_with("w1");
        state.create(Watchlist::new("Other").with_id("w1"));
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("w1").unwrap().name, "Momentum");
    }

    #[test]
    fn test_rename_and_delete() {
        let mut state = state_with("w1");
        state.rename("w1", "Trend".to_string());
        assert_eq!(state.get("w1").unwrap().name, "Trend");

        state.rename("nope", "x".to_string());
        state.delete("w1");
        assert!(state.is_empty());
    }

    #[test]
    fn test_containing() {
        let mut state = state_with("w1");
        state.create(Watchlist::new("B").with_id("w2"));
        state.add_strategy("w2", "s9".to_string());
        let ids: Vec<_> = state.containing("s9").map(|w| w.id.as_str()).collect();
        assert_eq!(ids, vec!["w2"]);
    }

    #[test]
    fn test_from_lists_normalises() {
        let mut dup = Watchlist::new("A").with_id("w1");
        dup.strategy_ids = vec!["s1".into(), "s1".into(), "s2".into()];
        let state = WatchlistState::from_lists(vec![dup, Watchlist::new("B").with_id("w1")]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("w1").unwrap().strategy_ids, ["s1", "s2"]);
    }
}
