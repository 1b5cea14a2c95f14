//! Key-value persistence seam.
//!
//! The store only needs three things from the medium: read a value for a key
//! under a namespace path, write one, and delete one. Any backend (plist,
//! JSON file, in-memory map) can sit behind this trait.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Failure of the underlying storage medium.
///
/// These are the only errors surfaced to users, so messages are written to be
/// shown as-is.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not access stored settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored settings are not readable: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not determine the settings directory")]
    NoConfigDirectory,
    #[error("settings storage failed: {0}")]
    Backend(String),
}

/// Trait for all persistence backends
pub trait PersistenceGateway: Send + Sync {
    /// Read the value stored for `key` under `path` (`None` if absent)
    fn get(&self, path: &str, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// Store `value` for `key` under `path`, replacing any previous value
    fn set(&self, path: &str, key: &str, value: Value) -> Result<(), PersistenceError>;

    /// Remove `key` under `path`. Removing an absent key succeeds.
    fn delete(&self, path: &str, key: &str) -> Result<(), PersistenceError>;

    /// Remove every key under `path`
    fn delete_all(&self, path: &str) -> Result<(), PersistenceError>;
}

/// Type-erased gateway for dynamic dispatch
pub type BoxedGateway = Box<dyn PersistenceGateway>;

/// Gateway backed by a process-local map.
///
/// Used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    entries: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether anything is stored for `key` under `path`
    pub fn contains(&self, path: &str, key: &str) -> bool {
        self.entries
            .read()
            .map(|entries| {
                entries
                    .get(path)
                    .is_some_and(|namespace| namespace.contains_key(key))
            })
            .unwrap_or(false)
    }
}

fn poisoned() -> PersistenceError {
    PersistenceError::Backend("in-memory store lock poisoned".to_string())
}

impl PersistenceGateway for InMemoryGateway {
    fn get(&self, path: &str, key: &str) -> Result<Option<Value>, PersistenceError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries
            .get(path)
            .and_then(|namespace| namespace.get(key))
            .cloned())
    }

    fn set(&self, path: &str, key: &str, value: Value) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries
            .entry(path.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, path: &str, key: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        if let Some(namespace) = entries.get_mut(path) {
            namespace.remove(key);
        }
        Ok(())
    }

    fn delete_all(&self, path: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(path);
        Ok(())
    }
}

/// Forwarding impl so one gateway can be shared between the store and its caller
impl<T: PersistenceGateway + ?Sized> PersistenceGateway for std::sync::Arc<T> {
    fn get(&self, path: &str, key: &str) -> Result<Option<Value>, PersistenceError> {
        (**self).get(path, key)
    }

    fn set(&self, path: &str, key: &str, value: Value) -> Result<(), PersistenceError> {
        (**self).set(path, key, value)
    }

    fn delete(&self, path: &str, key: &str) -> Result<(), PersistenceError> {
        (**self).delete(path, key)
    }

    fn delete_all(&self, path: &str) -> Result<(), PersistenceError> {
        (**self).delete_all(path)
    }
}
