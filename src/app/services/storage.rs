use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::app::domain::preferences::PreferenceState;
use crate::app::infrastructure::error::PersistenceError;

/// Namespace key the preference snapshot is stored under.
pub const PREFERENCES_KEY: &str = "preferences-storage";

/// Version written into every envelope. Records with another version are
/// treated as malformed.
pub const STORAGE_VERSION: u32 = 0;

/// Durable key-value store for serialized snapshots.
pub trait PreferenceStorage {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PreferenceStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Load {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let write_err = |e: std::io::Error| PersistenceError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        // Ensure the directory exists
        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(self.path_for(key), value).map_err(write_err)?;
        Ok(())
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.to_string(), value.to_string());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PreferenceStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a PreferenceState,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    state: PreferenceState,
    #[serde(default)]
    version: u32,
}

/// Serialize a snapshot as `{"state": ..., "version": 0}`.
pub fn encode_preferences(state: &PreferenceState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&EnvelopeRef {
        state,
        version: STORAGE_VERSION,
    })
}

/// Parse an envelope written by `encode_preferences`.
pub fn decode_preferences(key: &str, raw: &str) -> Result<PreferenceState, PersistenceError> {
    let envelope: Envelope = serde_json::from_str(raw).map_err(|e| PersistenceError::Load {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    if envelope.version != STORAGE_VERSION {
        return Err(PersistenceError::Load {
            key: key.to_string(),
            reason: format!("unsupported version {}", envelope.version),
        });
    }
    Ok(envelope.state)
}
