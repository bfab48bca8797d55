use confgen_types::TransportValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Which layer a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Volatile state written by a remote synchronization client.
    Sync,
    /// State enforced by a locally managed profile.
    Config,
}

/// The layers whose changes invalidate a cached read of a property.
///
/// Read-write properties may read both layers; read-only properties
/// never consult sync state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSet {
    Config,
    SyncAndConfig,
}

/// An immutable point-in-time view of a layer.
///
/// A getter takes one snapshot per layer up front, so its multi-alias
/// lookup sequence observes consistent state even while writers run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerSnapshot {
    entries: HashMap<String, TransportValue>,
}

impl LayerSnapshot {
    pub fn get(&self, key: &str) -> Option<&TransportValue> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, TransportValue>> for LayerSnapshot {
    fn from(entries: HashMap<String, TransportValue>) -> Self {
        Self { entries }
    }
}

/// Read capability over a layer.
pub trait LayerRead {
    fn get(&self, key: &str) -> Option<TransportValue>;
    fn snapshot(&self) -> LayerSnapshot;
}

/// Write capability over a layer. One writer at a time; readers never
/// observe a partially applied write.
pub trait LayerWrite: LayerRead {
    fn set(&self, key: &str, value: TransportValue);
    fn remove(&self, key: &str);
}

/// In-memory layer guarded by an `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryLayer {
    entries: RwLock<HashMap<String, TransportValue>>,
}

impl MemoryLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole layer contents, as the external sync client
    /// or profile loader does on refresh.
    pub fn replace(&self, entries: HashMap<String, TransportValue>) {
        *self.entries.write().unwrap() = entries;
    }
}

impl LayerRead for MemoryLayer {
    fn get(&self, key: &str) -> Option<TransportValue> {
        self.entries.read().unwrap().get(key).cloned()
    }

    fn snapshot(&self) -> LayerSnapshot {
        LayerSnapshot {
            entries: self.entries.read().unwrap().clone(),
        }
    }
}

impl LayerWrite for MemoryLayer {
    fn set(&self, key: &str, value: TransportValue) {
        self.entries.write().unwrap().insert(key.to_owned(), value);
    }

    fn remove(&self, key: &str) {
        self.entries.write().unwrap().remove(key);
    }
}

/// The layer pair a generated accessor surface is implemented against.
///
/// Generated getters snapshot through [`ConfigStore::sync_snapshot`] /
/// [`ConfigStore::config_snapshot`]; generated setters mutate only the
/// sync layer via [`ConfigStore::update_sync_state`]. The config layer
/// is populated exclusively by the external profile loader.
#[derive(Debug, Default)]
pub struct ConfigStore {
    pub sync: MemoryLayer,
    pub config: MemoryLayer,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync_snapshot(&self) -> LayerSnapshot {
        self.sync.snapshot()
    }

    pub fn config_snapshot(&self) -> LayerSnapshot {
        self.config.snapshot()
    }

    /// The only layer mutation generated code performs.
    pub fn update_sync_state(&self, key: &str, value: TransportValue) {
        tracing::debug!(key, "updating sync state");
        self.sync.set(key, value);
    }
}
