//! Strategy selections: favorites and the compare list.

/// Maximum number of strategies compared side by side.
pub const COMPARE_CAPACITY: usize = 4;

/// Favorited strategy ids, in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesState {
    ids: Vec<String>,
}

impl FavoritesState {
    /// Build from a restored list, dropping duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = String>) -> Self {
        let mut state = Self::default();
        for id in ids {
            state.add(id);
        }
        state
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|f| f == id)
    }

    /// Insert an id. Already present is a no-op.
    pub fn add(&mut self, id: String) {
        if !self.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|f| f != id);
    }
}

/// Strategies selected for side-by-side comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareState {
    ids: Vec<String>,
}

impl CompareState {
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= COMPARE_CAPACITY
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|c| c == id)
    }

    /// Append an id unless the list is full or already holds it.
    pub fn add(&mut self, id: String) {
        if self.is_full() || self.contains(&id) {
            return;
        }
        self.ids.push(id);
    }

    pub fn remove(&mut self, id: &str) {
        self.ids.retain(|c| c != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
