use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::ConfigError;

/// Port to the external key-value settings store.
///
/// Paths are flat section keys (`"profile"`, `"invoice"`, `"general"`);
/// values are whole JSON sections. Reads of unknown paths are `None`, not
/// errors; a fresh installation has nothing stored yet.
pub trait SettingsBackend: Send + Sync {
    fn get(&self, path: &str) -> Option<Value>;

    fn set(&self, path: &str, value: Value) -> Result<(), ConfigError>;
}

/// In-memory settings store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsBackend for MemoryBackend {
    fn get(&self, path: &str) -> Option<Value> {
        self.entries.read().unwrap().get(path).cloned()
    }

    fn set(&self, path: &str, value: Value) -> Result<(), ConfigError> {
        self.entries.write().unwrap().insert(path.to_string(), value);
        Ok(())
    }
}
