//! Persistence of the preference subset of the store.
//!
//! Only theme, favorites, watchlists and recent searches survive a restart.
//! Everything else starts from its default on every load.

mod backend;
mod persisted;
mod writer;

pub use backend::{FileStorage, MemoryStorage, StorageBackend};
pub use persisted::PersistedState;
pub use writer::Persistence;

#[cfg(test)]
pub use backend::MockStorageBackend;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "strategy-marketplace-storage";
