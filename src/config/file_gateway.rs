//! JSON-file backed persistence.
//!
//! Each namespace path is one pretty-printed JSON document in the config
//! directory, holding a flat `key -> value` object.

use helium_core::{PersistenceError, PersistenceGateway};
use log::{debug, trace};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

pub struct JsonFileGateway {
    root: PathBuf,
    /// Serializes reads and read-modify-write cycles on the documents
    lock: Mutex<()>,
}

impl JsonFileGateway {
    /// Gateway storing documents under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            lock: Mutex::new(()),
        }
    }

    /// Gateway rooted at the platform config directory
    pub fn from_project_dirs() -> Result<Self, PersistenceError> {
        let dirs = directories::ProjectDirs::from("com", "leemin", "helium")
            .ok_or(PersistenceError::NoConfigDirectory)?;
        Ok(Self::new(dirs.config_dir()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the document for a namespace path
    pub fn document_path(&self, path: &str) -> PathBuf {
        self.root.join(format!("{}.json", path))
    }

    fn read_document(&self, path: &str) -> Result<Map<String, Value>, PersistenceError> {
        let file = self.document_path(path);
        if !file.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&file)?;
        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(PersistenceError::Backend(format!(
                "{} does not contain a settings object",
                file.display()
            ))),
        }
    }

    fn write_document(&self, path: &str, document: &Map<String, Value>) -> Result<(), PersistenceError> {
        let file = self.document_path(path);

        if document.is_empty() {
            if file.exists() {
                fs::remove_file(&file)?;
                debug!("Removed empty settings document {}", file.display());
            }
            return Ok(());
        }

        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }

        // Readers only ever see the old or the new document.
        let staged = file.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&staged, content)?;
        if let Err(err) = fs::rename(&staged, &file) {
            let _ = fs::remove_file(&staged);
            return Err(err.into());
        }
        trace!("Wrote {} keys to {}", document.len(), file.display());
        Ok(())
    }

    fn guard(&self) -> Result<MutexGuard<'_, ()>, PersistenceError> {
        self.lock
            .lock()
            .map_err(|_| PersistenceError::Backend("settings file lock poisoned".to_string()))
    }

    fn modify<F>(&self, path: &str, edit: F) -> Result<(), PersistenceError>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.guard()?;
        let mut document = self.read_document(path)?;
        edit(&mut document);
        self.write_document(path, &document)
    }
}

impl PersistenceGateway for JsonFileGateway {
    fn get(&self, path: &str, key: &str) -> Result<Option<Value>, PersistenceError> {
        let _guard = self.guard()?;
        let mut document = self.read_document(path)?;
        Ok(document.remove(key))
    }

    fn set(&self, path: &str, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.modify(path, |document| {
            document.insert(key.to_string(), value);
        })
    }

    fn delete(&self, path: &str, key: &str) -> Result<(), PersistenceError> {
        self.modify(path, |document| {
            document.remove(key);
        })
    }

    fn delete_all(&self, path: &str) -> Result<(), PersistenceError> {
        self.modify(path, Map::clear)
    }
}
