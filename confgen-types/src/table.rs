use crate::value::TransportType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An alias → required-transport-type table.
///
/// Two of these are emitted per compilation: the keys a remote sync
/// channel may write, and the keys a locally enforced profile may set.
/// They are the sole boundary at which inbound key/value pairs are
/// type-checked before reaching a layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyTable {
    entries: BTreeMap<String, TransportType>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the transport type required for a key.
    pub fn insert(&mut self, key: &str, transport: TransportType) {
        self.entries.insert(key.to_owned(), transport);
    }

    /// The transport type an inbound value for `key` must satisfy.
    pub fn get(&self, key: &str) -> Option<TransportType> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in deterministic (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, TransportType)> {
        self.entries.iter().map(|(k, t)| (k.as_str(), *t))
    }
}
