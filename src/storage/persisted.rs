//! The persisted record and its projection to and from store state.

use crate::state::{FavoritesState, SearchState, StoreState, Theme, Watchlist, WatchlistState};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// The subset of state written to durable storage.
///
/// Serialized as a flat, versionless JSON object:
/// `{"theme": .., "favorites": [..], "watchlists": [..], "recentSearches": [..]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub theme: Theme,
    pub favorites: Vec<String>,
    pub watchlists: Vec<Watchlist>,
    pub recent_searches: Vec<String>,
}

impl PersistedState {
    /// Extract the persisted fields from a full state.
    pub fn project(state: &StoreState) -> Self {
        Self {
            theme: state.app.theme,
            favorites: state.favorites.ids().to_vec(),
            watchlists: state.watchlists.lists().to_vec(),
            recent_searches: state.search.recent().to_vec(),
        }
    }

    /// Merge this record over `defaults`.
    ///
    /// Restored collections are normalised: duplicates are dropped and the
    /// search history is capped.
    pub fn restore(self, defaults: StoreState) -> StoreState {
        let StoreState {
            mut app,
            notifications,
            compare,
            search: default_search,
            ..
        } = defaults;

        app.theme = self.theme;
        let mut search = SearchState::from_recent(self.recent_searches);
        search.query = default_search.query;

        StoreState {
            app,
            notifications,
            favorites: FavoritesState::from_ids(self.favorites),
            watchlists: WatchlistState::from_lists(self.watchlists),
            compare,
            search,
        }
    }

    /// Whether any persisted field differs between two states.
    pub fn differs(prev: &StoreState, next: &StoreState) -> bool {
        prev.app.theme != next.app.theme
            || prev.favorites != next.favorites
            || prev.watchlists != next.watchlists
            || prev.search.recent() != next.search.recent()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored record, never failing.
    ///
    /// Unparseable input yields the default record. Each field is decoded on
    /// its own, so one malformed field only resets that field, and list
    /// fields drop only the entries that fail to decode. Records
    /// wrapped in a `{"state": {..}, "version": n}` envelope are unwrapped.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!(error = %e, "persisted record is not valid JSON, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let Some(mut record) = value.as_object() else {
            warn!("persisted record is not an object, using defaults");
            return Self::default();
        };

        if !Self::has_known_field(record)
            && let Some(inner) = record.get("state").and_then(Value::as_object)
        {
            record = inner;
        }

        Self {
            theme: field(record, "theme"),
            favorites: elements(record, "favorites"),
            watchlists: elements(record, "watchlists"),
            recent_searches: elements(record, "recentSearches"),
        }
    }

    fn has_known_field(record: &Map<String, Value>) -> bool {
        ["theme", "favorites", "watchlists", "recentSearches"]
            .iter()
            .any(|k| record.contains_key(*k))
    }
}

fn field<T: DeserializeOwned + Default>(record: &Map<String, Value>, name: &str) -> T {
    match record.get(name) {
        None => T::default(),
        Some(value) => T::deserialize(value).unwrap_or_else(|e| {
            warn!(field = name, error = %e, "malformed persisted field, using default");
            T::default()
        }),
    }
}

/// Decode a list field, skipping elements that do not fit `T`.
fn elements<T: DeserializeOwned>(record: &Map<String, Value>, name: &str) -> Vec<T> {
    let Some(value) = record.get(name) else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        warn!(field = name, "persisted field is not a list, using default");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(field = name, index, error = %e, "skipping malformed persisted entry");
                None
            }
        })
        .collect()
}
