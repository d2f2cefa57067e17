//! Application context.
//!
//! [`AppContext`] is created once at start-up and handed to every UI
//! collaborator. It owns the store, its persistence writer and the auth
//! collaborator, and is torn down explicitly on shutdown.

use crate::auth::{AuthProvider, ProfileUpdate, User};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::state::{Action, Store, StoreState};
use crate::storage::{FileStorage, MemoryStorage, Persistence, StorageBackend};
use std::sync::Arc;
use tracing::info;

/// Everything the UI needs, passed explicitly instead of living in a global.
pub struct AppContext {
    store: Store,
    auth: Option<Arc<dyn AuthProvider>>,
    config: Config,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("store", &self.store)
            .field("auth", &self.auth.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl AppContext {
    /// Build the context from configuration and restore persisted state.
    pub fn init(config: Config) -> Result<Self> {
        FileStorage::validate_key(&config.storage.key)
            .map_err(|e| Error::config(format!("storage.key: {}", e)))?;

        let backend: Arc<dyn StorageBackend> = if config.storage.enabled {
            let storage = FileStorage::new(config.storage.resolve_directory()?);
            info!(dir = %storage.dir().display(), "using file storage");
            Arc::new(storage)
        } else {
            info!("persistence disabled, using memory storage");
            Arc::new(MemoryStorage::new())
        };

        let key = config.storage.key.clone();
        let mut context = Self::with_backend(backend, key);
        context.config = config;
        Ok(context)
    }

    /// Build the context on an explicit storage backend.
    pub fn with_backend(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        let persistence = Persistence::new(backend, key);
        let restored = persistence.load().restore(StoreState::default());
        info!(
            key = persistence.key(),
            favorites = restored.favorites.len(),
            watchlists = restored.watchlists.len(),
            theme = %restored.theme(),
            "store initialised"
        );

        Self {
            store: Store::with_persistence(restored, persistence),
            auth: None,
            config: Config::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Shorthand for `store_mut().dispatch(action)`.
    pub fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    /// Connect the authentication collaborator.
    pub fn attach_auth(&mut self, provider: Arc<dyn AuthProvider>) {
        self.auth = Some(provider);
    }

    /// The signed-in user, as reported by the auth collaborator.
    pub fn user(&self) -> Option<User> {
        self.auth.as_ref().and_then(|auth| auth.user())
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        let auth = self.auth_provider()?;
        auth.update_profile(update).await
    }

    /// Sign out and drop the session-scoped parts of the state.
    ///
    /// Preferences (theme, favorites, watchlists, history) are kept.
    pub async fn sign_out(&mut self) -> Result<()> {
        let auth = Arc::clone(self.auth_provider()?);
        auth.sign_out().await?;

        self.store.dispatch(Action::ClearNotifications);
        self.store.dispatch(Action::ClearCompare);
        self.store.dispatch(Action::SetModalOpen(None));
        info!("signed out");
        Ok(())
    }

    /// Drop subscribers and wait for pending writes.
    pub async fn teardown(mut self) {
        self.store.clear_subscribers();
        if let Some(persistence) = self.store.take_persistence() {
            persistence.flush().await;
        }
        info!("context torn down");
    }

    fn auth_provider(&self) -> Result<&Arc<dyn AuthProvider>> {
        self.auth
            .as_ref()
            .ok_or_else(|| Error::auth("no authentication provider attached"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{MockAuthProvider, SubscriptionTier};
    use crate::state::{Notification, Theme, Watchlist};
    use crate::storage::DEFAULT_STORAGE_KEY;
    use pretty_assertions::assert_eq;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            display_name: "Grace".to_string(),
            avatar_url: None,
            tier: SubscriptionTier::Free,
        }
    }

    #[tokio::test]
    async fn test_restart_restores_preferences() {
        let storage = MemoryStorage::new();

        let mut ctx = AppContext::with_backend(Arc::new(storage.clone()), DEFAULT_STORAGE_KEY);
        {
            let store = ctx.store_mut();
            store.toggle_theme();
            store.add_to_favorites("s1");
            store.create_watchlist(Watchlist::new("Main").with_id("w1"));
            store.add_to_watchlist("w1", "s2");
            store.add_recent_search("breakout");
            store.add_to_compare("s1");
            store.add_notification(Notification::new("Hi", "welcome"));
            store.toggle_sidebar();
        }
        let written = ctx.store().state().clone();
        ctx.teardown().await;

        let ctx = AppContext::with_backend(Arc::new(storage), DEFAULT_STORAGE_KEY);
        let state = ctx.store().state();
        assert_eq!(state.theme(), Theme::Light);
        assert_eq!(state.favorites, written.favorites);
        assert_eq!(state.watchlists, written.watchlists);
        assert_eq!(state.recent_searches(), written.recent_searches());
        assert!(state.compare.is_empty());
        assert!(state.notifications.is_empty());
        assert!(!state.app.sidebar_open);
    }

    #[tokio::test]
    async fn test_init_with_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.directory = Some(dir.path().to_path_buf());

        let mut ctx = AppContext::init(config.clone()).unwrap();
        ctx.store_mut().add_to_favorites("s9");
        ctx.teardown().await;

        assert!(
            dir.path()
                .join(format!("{}.json", DEFAULT_STORAGE_KEY))
                .exists()
        );
        let ctx = AppContext::init(config).unwrap();
        assert!(ctx.store().is_favorite("s9"));
    }

    #[test]
    fn test_init_without_persistence() {
        let mut config = Config::default();
        config.storage.enabled = false;
        let ctx = AppContext::init(config).unwrap();
        assert_eq!(*ctx.store().state(), StoreState::default());
        assert!(!ctx.config().storage.enabled);
    }

    #[test]
    fn test_init_rejects_unusable_storage_key() {
        let dir = tempfile::tempdir().unwrap();
        for key in ["", "bad key", "../escape", ".hidden"] {
            let mut config = Config::default();
            config.storage.directory = Some(dir.path().to_path_buf());
            config.storage.key = key.to_string();
            let err = AppContext::init(config).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "key {:?}: {}", key, err);
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_user_comes_from_auth() {
        let mut ctx = AppContext::with_backend(Arc::new(MemoryStorage::new()), "k");
        assert_eq!(ctx.user(), None);

        let mut auth = MockAuthProvider::new();
        auth.expect_user().returning(|| Some(user()));
        ctx.attach_auth(Arc::new(auth));
        assert_eq!(ctx.user(), Some(user()));
    }

    #[tokio::test]
    async fn test_sign_out_keeps_preferences() {
        let mut ctx = AppContext::with_backend(Arc::new(MemoryStorage::new()), "k");
        let mut auth = MockAuthProvider::new();
        auth.expect_sign_out().times(1).returning(|| Ok(()));
        ctx.attach_auth(Arc::new(auth));

        ctx.store_mut().add_to_favorites("s1");
        ctx.store_mut().add_to_compare("s1");
        ctx.store_mut().add_notification(Notification::new("t", "m"));
        ctx.store_mut().set_modal_open(Some("profile".to_string()));

        ctx.sign_out().await.unwrap();
        let state = ctx.store().state();
        assert!(state.is_favorite("s1"));
        assert!(state.compare.is_empty());
        assert!(state.notifications.is_empty());
        assert_eq!(state.app.active_modal, None);
    }

    #[tokio::test]
    async fn test_sign_out_failure_leaves_state() {
        let mut ctx = AppContext::with_backend(Arc::new(MemoryStorage::new()), "k");
        let mut auth = MockAuthProvider::new();
        auth.expect_sign_out()
            .returning(|| Err(Error::auth("network down")));
        ctx.attach_auth(Arc::new(auth));
        ctx.store_mut().add_to_compare("s1");

        assert!(ctx.sign_out().await.is_err());
        assert!(ctx.store().is_in_compare("s1"));
    }

    #[tokio::test]
    async fn test_profile_update_requires_provider() {
        let ctx = AppContext::with_backend(Arc::new(MemoryStorage::new()), "k");
        let err = ctx.update_profile(ProfileUpdate::default()).await;
        assert!(matches!(err, Err(Error::Auth(_))));
    }

    #[tokio::test]
    async fn test_profile_update_delegates() {
        let mut ctx = AppContext::with_backend(Arc::new(MemoryStorage::new()), "k");
        let mut auth = MockAuthProvider::new();
        auth.expect_update_profile()
            .returning(|update| Ok(update.apply_to(&user())));
        ctx.attach_auth(Arc::new(auth));

        let updated = ctx
            .update_profile(ProfileUpdate {
                display_name: Some("G. Hopper".to_string()),
                avatar_url: None,
            })
            .await
            .unwrap();
        assert_eq!(updated.display_name, "G. Hopper");
    }
}
