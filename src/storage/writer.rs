//! Load-on-start and fire-and-forget writes of the persisted record.

use super::{PersistedState, StorageBackend};
use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

enum WriteMode {
    /// Write on the caller's thread.
    Inline,
    /// Hand records to a background task.
    Background {
        tx: mpsc::UnboundedSender<PersistedState>,
        task: JoinHandle<()>,
    },
}

/// Connects the store to a [`StorageBackend`] under a fixed key.
///
/// Failures never reach the store: reads fall back to defaults and write
/// errors are logged and dropped.
pub struct Persistence {
    backend: Arc<dyn StorageBackend>,
    key: String,
    mode: WriteMode,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.mode {
            WriteMode::Inline => "inline",
            WriteMode::Background { .. } => "background",
        };
        f.debug_struct("Persistence")
            .field("key", &self.key)
            .field("mode", &mode)
            .finish()
    }
}

impl Persistence {
    /// Use a background writer when called inside a tokio runtime,
    /// otherwise write inline.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => Self::background(&handle, backend, key),
            Err(_) => {
                debug!("no tokio runtime, persisting inline");
                Self::inline(backend, key)
            }
        }
    }

    /// Write every record synchronously on the dispatching thread.
    pub fn inline(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            mode: WriteMode::Inline,
        }
    }

    /// Spawn the writer task on `handle`.
    pub fn background(
        handle: &tokio::runtime::Handle,
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let (tx, rx) = mpsc::unbounded_channel();
        let task = handle.spawn(write_loop(Arc::clone(&backend), key.clone(), rx));
        Self {
            backend,
            key,
            mode: WriteMode::Background { tx, task },
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the stored record. Missing, unreadable or corrupt data yields defaults.
    pub fn load(&self) -> PersistedState {
        match self.backend.read(&self.key) {
            Ok(Some(raw)) => {
                info!(key = %self.key, "restored persisted state");
                PersistedState::from_json(&raw)
            }
            Ok(None) => {
                debug!(key = %self.key, "no persisted state, using defaults");
                PersistedState::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read persisted state, using defaults");
                PersistedState::default()
            }
        }
    }

    /// Queue `record` for writing. Returns immediately in background mode.
    pub fn schedule(&self, record: PersistedState) {
        if let Err(e) = self.try_schedule(record) {
            warn!(key = %self.key, error = %e, "dropping write");
        }
    }

    /// Like [`schedule`](Self::schedule), but reports a stopped writer.
    ///
    /// Inline write failures are still only logged.
    pub fn try_schedule(&self, record: PersistedState) -> Result<()> {
        match &self.mode {
            WriteMode::Inline => {
                write_record(self.backend.as_ref(), &self.key, &record);
                Ok(())
            }
            WriteMode::Background { tx, .. } => tx
                .send(record)
                .map_err(|_| Error::channel("persistence writer stopped")),
        }
    }

    /// Wait for queued writes to land and stop the writer.
    pub async fn flush(self) {
        if let WriteMode::Background { tx, task } = self.mode {
            drop(tx);
            if let Err(e) = task.await {
                warn!(error = %e, "persistence writer task failed");
            }
        }
    }
}

async fn write_loop(
    backend: Arc<dyn StorageBackend>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<PersistedState>,
) {
    while let Some(mut record) = rx.recv().await {
        // Only the latest record matters.
        while let Ok(newer) = rx.try_recv() {
            record = newer;
        }

        let backend = Arc::clone(&backend);
        let key = key.clone();
        let result =
            tokio::task::spawn_blocking(move || write_record(backend.as_ref(), &key, &record))
                .await;
        if let Err(e) = result {
            warn!(error = %e, "persistence write task failed");
        }
    }
    debug!("persistence writer finished");
}

fn write_record(backend: &dyn StorageBackend, key: &str, record: &PersistedState) {
    let json = match record.to_json() {
        Ok(json) => json,
        Err(e) => {
            warn!(key, error = %e, "failed to encode persisted state");
            return;
        }
    };
    match backend.write(key, &json) {
        Ok(()) => debug!(key, bytes = json.len(), "persisted state written"),
        Err(e) => warn!(key, error = %e, "failed to write persisted state"),
    }
}
