//! # Key-Value Storage
//!
//! The durable storage slot the cart persists into.
//!
//! The contract is deliberately tiny: `get` reads a serialized value,
//! `set` replaces it (last-writer-wins). The cart store uses exactly one
//! fixed key, reads it once at startup, and is the only writer.
//!
//! Storage trouble is never fatal. A failed read rehydrates an empty
//! cart; a failed write drops that snapshot and logs a warning. The next
//! mutation writes the full item sequence again, so a single lost write
//! costs nothing once any later write lands.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

/// A durable key-value slot: `get` a serialized value, `set` replaces it.
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value under `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Replaces the value under `key`.
    fn set(&self, key: &str, value: &str);
}

/// In-memory storage.
///
/// Clones share the same slots, so a test can keep a handle and inspect
/// what the cart store persisted after each mutation.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.slots
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), value.to_string());
    }
}

/// File-backed storage: one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Some(value),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                warn!(key, %err, "failed to read storage file, treating as absent");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = fs::create_dir_all(&self.dir) {
            warn!(key, %err, "failed to create storage directory, dropping write");
            return;
        }
        if let Err(err) = fs::write(self.path_for(key), value) {
            warn!(key, %err, "failed to write storage file, dropping write");
        }
    }
}
