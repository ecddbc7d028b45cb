//! Best-effort saved-game persistence.
//!
//! The engine does not do I/O itself; it hands JSON snapshots to whatever
//! `BlobStore` the host provides. Persistence is never required for
//! correctness: store failures are logged and swallowed, and a corrupt
//! snapshot reads back as "no saved game".

use rustc_hash::FxHashMap;

use crate::engine::GameEngine;

/// Storage key under which the running game is saved.
pub const SAVE_KEY: &str = "jorge-game-state";

/// A blob store write or remove failure. Non-fatal by contract.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("store failure: {0}")]
pub struct StoreError(pub String);

/// Minimal key-value blob store the host supplies.
///
/// `remove` of an absent key is a successful no-op.
pub trait BlobStore {
    /// Read a blob, `None` if absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a blob.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a blob.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used in tests and as a reference implementation.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Save the engine under `SAVE_KEY`. Failures are logged, never surfaced.
pub fn save(store: &mut dyn BlobStore, engine: &GameEngine) {
    let blob = match engine.serialize() {
        Ok(blob) => blob,
        Err(err) => {
            tracing::warn!(%err, "failed to serialize game for saving");
            return;
        }
    };
    if let Err(err) = store.set(SAVE_KEY, &blob) {
        tracing::warn!(%err, "failed to write saved game");
    }
}

/// Load the saved game, if a structurally valid one exists.
///
/// A missing entry and a corrupt one look the same to the caller: `None`.
#[must_use]
pub fn load(store: &dyn BlobStore) -> Option<GameEngine> {
    let blob = store.get(SAVE_KEY)?;
    match GameEngine::restore(&blob) {
        Ok(engine) => Some(engine),
        Err(err) => {
            tracing::warn!(%err, "ignoring corrupt saved game");
            None
        }
    }
}

/// Delete the saved game. A no-op if nothing was stored; failures are logged.
pub fn clear(store: &mut dyn BlobStore) {
    if let Err(err) = store.remove(SAVE_KEY) {
        tracing::warn!(%err, "failed to clear saved game");
    }
}
