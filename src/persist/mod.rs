//! Command properties persistence
//!
//! A [`PropertiesStore`] holds per-command [`CommandProperties`] keyed by
//! command id. A manager configured with a store overlays persisted
//! properties at registration time (so operators can e.g. keep a command
//! disabled across restarts) and writes defaults for ids it has never
//! seen. [`JsonPropertiesStore`] keeps one `<id>.json` file per command
//! under a directory; [`MemoryPropertiesStore`] backs tests and embedded
//! hosts.

use crate::command::properties::CommandProperties;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Storage for per-command properties, keyed by command id.
pub trait PropertiesStore: Send + Sync {
    /// Load stored properties for `id`. None when absent or unreadable.
    fn load(&self, id: &str) -> Option<CommandProperties>;

    /// Persist `properties` under its command id, replacing any previous
    /// value. Returns false when the store could not be written.
    fn save(&self, properties: &CommandProperties) -> bool;

    /// Whether anything is stored under `id`, readable or not.
    fn contains(&self, id: &str) -> bool;
}

/// One pretty-printed JSON file per command id under a directory.
#[derive(Debug, Clone)]
pub struct JsonPropertiesStore {
    folder: PathBuf,
}

impl JsonPropertiesStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.folder.join(format!("{id}.json"))
    }
}

impl PropertiesStore for JsonPropertiesStore {
    fn load(&self, id: &str) -> Option<CommandProperties> {
        let path = self.path_for(id);
        let bytes = fs::read(&path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(properties) => Some(properties),
            Err(error) => {
                tracing::error!(%id, path = %path.display(), %error, "unreadable properties file");
                None
            }
        }
    }

    fn save(&self, properties: &CommandProperties) -> bool {
        let path = self.path_for(properties.id());
        let json = match serde_json::to_vec_pretty(properties) {
            Ok(json) => json,
            Err(error) => {
                tracing::error!(id = properties.id(), %error, "failed to serialize properties");
                return false;
            }
        };
        let write = fs::create_dir_all(&self.folder).and_then(|()| fs::write(&path, json));
        if let Err(error) = write {
            tracing::error!(path = %path.display(), %error, "failed to write properties file");
            return false;
        }
        true
    }

    fn contains(&self, id: &str) -> bool {
        self.path_for(id).exists()
    }
}

/// In-memory store with shared-on-clone contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryPropertiesStore {
    entries: Arc<Mutex<HashMap<String, CommandProperties>>>,
}

impl MemoryPropertiesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertiesStore for MemoryPropertiesStore {
    fn load(&self, id: &str) -> Option<CommandProperties> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    fn save(&self, properties: &CommandProperties) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(properties.id().to_string(), properties.clone());
        true
    }

    fn contains(&self, id: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }
}
