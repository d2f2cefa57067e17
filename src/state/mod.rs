//! State management for stratmarket.
//!
//! This module provides centralized state management with a unidirectional
//! data flow pattern inspired by Redux/Elm architecture. Every [`Action`] is
//! reduced into a fresh immutable [`Snapshot`]; subscribers are notified
//! synchronously and the persisted subset is handed to the storage writer.

mod app_state;
mod notification_state;
mod search_state;
mod selection_state;
mod watchlist_state;

pub use app_state::{AppState, Theme};
pub use notification_state::{Notification, NotificationState};
pub use search_state::{RECENT_SEARCH_LIMIT, SearchState};
pub use selection_state::{COMPARE_CAPACITY, CompareState, FavoritesState};
pub use watchlist_state::{Watchlist, WatchlistState};

use crate::storage::{PersistedState, Persistence};
use std::sync::Arc;
use tracing::debug;

/// An immutable view of the whole state at one instant.
pub type Snapshot = Arc<StoreState>;

/// Actions that can be dispatched to modify state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Theme
    SetTheme(Theme),
    ToggleTheme,

    // Notifications
    AddNotification(Notification),
    MarkAsRead(String),
    MarkAllAsRead,
    RemoveNotification(String),
    ClearNotifications,

    // Favorites
    AddToFavorites(String),
    RemoveFromFavorites(String),

    // Watchlists
    CreateWatchlist(Watchlist),
    DeleteWatchlist(String),
    RenameWatchlist { watchlist_id: String, name: String },
    AddToWatchlist { watchlist_id: String, strategy_id: String },
    RemoveFromWatchlist { watchlist_id: String, strategy_id: String },

    // Compare
    AddToCompare(String),
    RemoveFromCompare(String),
    ClearCompare,

    // Search
    SetSearchQuery(String),
    AddRecentSearch(String),
    ClearRecentSearches,

    // UI flags
    ToggleSidebar,
    SetModalOpen(Option<String>),

    // Everything back to defaults
    Reset,
}

/// The complete client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Theme and UI flags.
    pub app: AppState,
    /// Notification inbox.
    pub notifications: NotificationState,
    /// Favorited strategies.
    pub favorites: FavoritesState,
    /// User watchlists.
    pub watchlists: WatchlistState,
    /// Strategies selected for comparison.
    pub compare: CompareState,
    /// Search box and history.
    pub search: SearchState,
}

impl StoreState {
    pub fn theme(&self) -> Theme {
        self.app.theme
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.unread_count()
    }

    pub fn is_favorite(&self, strategy_id: &str) -> bool {
        self.favorites.contains(strategy_id)
    }

    pub fn is_in_compare(&self, strategy_id: &str) -> bool {
        self.compare.contains(strategy_id)
    }

    pub fn compare_is_full(&self) -> bool {
        self.compare.is_full()
    }

    pub fn watchlist(&self, watchlist_id: &str) -> Option<&Watchlist> {
        self.watchlists.get(watchlist_id)
    }

    /// Watchlists that hold the given strategy.
    pub fn watchlists_containing<'a>(
        &'a self,
        strategy_id: &'a str,
    ) -> impl Iterator<Item = &'a Watchlist> {
        self.watchlists.containing(strategy_id)
    }

    pub fn recent_searches(&self) -> &[String] {
        self.search.recent()
    }

    fn apply(&mut self, action: Action) {
        match action {
            // Theme
            Action::SetTheme(theme) => {
                self.app.set_theme(theme);
            }
            Action::ToggleTheme => self.app.toggle_theme(),

            // Notifications
            Action::AddNotification(notification) => self.notifications.add(notification),
            Action::MarkAsRead(id) => self.notifications.mark_as_read(&id),
            Action::MarkAllAsRead => self.notifications.mark_all_as_read(),
            Action::RemoveNotification(id) => self.notifications.remove(&id),
            Action::ClearNotifications => self.notifications.clear(),

            // Favorites
            Action::AddToFavorites(id) => self.favorites.add(id),
            Action::RemoveFromFavorites(id) => self.favorites.remove(&id),

            // Watchlists
            Action::CreateWatchlist(watchlist) => self.watchlists.create(watchlist),
            Action::DeleteWatchlist(id) => self.watchlists.delete(&id),
            Action::RenameWatchlist { watchlist_id, name } => {
                self.watchlists.rename(&watchlist_id, name)
            }
            Action::AddToWatchlist {
                watchlist_id,
                strategy_id,
            } => self.watchlists.add_strategy(&watchlist_id, strategy_id),
            Action::RemoveFromWatchlist {
                watchlist_id,
                strategy_id,
            } => self.watchlists.remove_strategy(&watchlist_id, &strategy_id),

            // Compare
            Action::AddToCompare(id) => self.compare.add(id),
            Action::RemoveFromCompare(id) => self.compare.remove(&id),
            Action::ClearCompare => self.compare.clear(),

            // Search
            Action::SetSearchQuery(query) => self.search.query = query,
            Action::AddRecentSearch(query) => self.search.push_recent(query),
            Action::ClearRecentSearches => self.search.clear_recent(),

            // UI flags
            Action::ToggleSidebar => self.app.toggle_sidebar(),
            Action::SetModalOpen(modal) => self.app.set_modal_open(modal),

            Action::Reset => *self = Self::default(),
        }
    }
}

/// Compute the state that follows `state` under `action`.
///
/// Pure and total: the input is left untouched and no action can fail.
pub fn reduce(state: &StoreState, action: Action) -> StoreState {
    let mut next = state.clone();
    next.apply(action);
    next
}

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Snapshot) + Send>;

/// The state store: current snapshot, subscribers and the persistence hook.
pub struct Store {
    state: Snapshot,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    persistence: Option<Persistence>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .field("persistence", &self.persistence)
            .finish()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreState::default())
    }
}

impl Store {
    /// Create a store that keeps nothing across restarts.
    pub fn new(initial: StoreState) -> Self {
        Self {
            state: Arc::new(initial),
            subscribers: Vec::new(),
            next_subscription: 0,
            persistence: None,
        }
    }

    /// Create a store that hands its persisted subset to `persistence`.
    pub fn with_persistence(initial: StoreState, persistence: Persistence) -> Self {
        Self {
            persistence: Some(persistence),
            ..Self::new(initial)
        }
    }

    /// Current state.
    pub fn state(&self) -> &StoreState {
        &self.state
    }

    /// Current snapshot, cheap to clone and hold on to.
    pub fn snapshot(&self) -> Snapshot {
        Arc::clone(&self.state)
    }

    /// Register a callback invoked with every new snapshot.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Snapshot) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Drop a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscription.
    pub fn clear_subscribers(&mut self) {
        self.subscribers.clear();
    }

    /// Detach the persistence writer, e.g. to flush it on shutdown.
    pub fn take_persistence(&mut self) -> Option<Persistence> {
        self.persistence.take()
    }

    /// Apply an action.
    ///
    /// When the state changes, the new snapshot is installed and every
    /// subscriber has seen it before this returns. A write is scheduled
    /// whenever one of the persisted fields changed.
    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let next = reduce(&self.state, action);
        if next == *self.state {
            debug!("action left state unchanged");
            return;
        }

        let persist = PersistedState::differs(&self.state, &next);
        self.state = Arc::new(next);

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&self.state);
        }

        if persist && let Some(persistence) = &self.persistence {
            persistence.schedule(PersistedState::project(&self.state));
        }
    }

    // Theme

    pub fn set_theme(&mut self, theme: Theme) {
        self.dispatch(Action::SetTheme(theme));
    }

    pub fn toggle_theme(&mut self) {
        self.dispatch(Action::ToggleTheme);
    }

    // Notifications

    pub fn add_notification(&mut self, notification: Notification) {
        self.dispatch(Action::AddNotification(notification));
    }

    pub fn mark_as_read(&mut self, id: impl Into<String>) {
        self.dispatch(Action::MarkAsRead(id.into()));
    }

    pub fn mark_all_as_read(&mut self) {
        self.dispatch(Action::MarkAllAsRead);
    }

    pub fn remove_notification(&mut self, id: impl Into<String>) {
        self.dispatch(Action::RemoveNotification(id.into()));
    }

    pub fn clear_notifications(&mut self) {
        self.dispatch(Action::ClearNotifications);
    }

    pub fn unread_count(&self) -> usize {
        self.state.unread_count()
    }

    // Favorites

    pub fn add_to_favorites(&mut self, strategy_id: impl Into<String>) {
        self.dispatch(Action::AddToFavorites(strategy_id.into()));
    }

    pub fn remove_from_favorites(&mut self, strategy_id: impl Into<String>) {
        self.dispatch(Action::RemoveFromFavorites(strategy_id.into()));
    }

    pub fn is_favorite(&self, strategy_id: &str) -> bool {
        self.state.is_favorite(strategy_id)
    }

    // Watchlists

    pub fn create_watchlist(&mut self, watchlist: Watchlist) {
        self.dispatch(Action::CreateWatchlist(watchlist));
    }

    pub fn delete_watchlist(&mut self, watchlist_id: impl Into<String>) {
        self.dispatch(Action::DeleteWatchlist(watchlist_id.into()));
    }

    pub fn rename_watchlist(&mut self, watchlist_id: impl Into<String>, name: impl Into<String>) {
        self.dispatch(Action::RenameWatchlist {
            watchlist_id: watchlist_id.into(),
            name: name.into(),
        });
    }

    pub fn add_to_watchlist(
        &mut self,
        watchlist_id: impl Into<String>,
        strategy_id: impl Into<String>,
    ) {
        self.dispatch(Action::AddToWatchlist {
            watchlist_id: watchlist_id.into(),
            strategy_id: strategy_id.into(),
        });
    }

    pub fn remove_from_watchlist(
        &mut self,
        watchlist_id: impl Into<String>,
        strategy_id: impl Into<String>,
    ) {
        self.dispatch(Action::RemoveFromWatchlist {
            watchlist_id: watchlist_id.into(),
            strategy_id: strategy_id.into(),
        });
    }

    // Compare

    pub fn add_to_compare(&mut self, strategy_id: impl Into<String>) {
        self.dispatch(Action::AddToCompare(strategy_id.into()));
    }

    pub fn remove_from_compare(&mut self, strategy_id: impl Into<String>) {
        self.dispatch(Action::RemoveFromCompare(strategy_id.into()));
    }

    pub fn clear_compare(&mut self) {
        self.dispatch(Action::ClearCompare);
    }

    pub fn is_in_compare(&self, strategy_id: &str) -> bool {
        self.state.is_in_compare(strategy_id)
    }

    // Search

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.dispatch(Action::SetSearchQuery(query.into()));
    }

    pub fn add_recent_search(&mut self, query: impl Into<String>) {
        self.dispatch(Action::AddRecentSearch(query.into()));
    }

    pub fn clear_recent_searches(&mut self) {
        self.dispatch(Action::ClearRecentSearches);
    }

    // UI flags

    pub fn toggle_sidebar(&mut self) {
        self.dispatch(Action::ToggleSidebar);
    }

    pub fn set_modal_open(&mut self, modal: Option<String>) {
        self.dispatch(Action::SetModalOpen(modal));
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        self.dispatch(Action::Reset);
    }
}
