//! Key-value persistence used by every collection.
//!
//! Values are JSON documents stored under `"{prefix}-{key}"`. The store itself
//! knows nothing about the shapes it holds; [`Storage`] does the typed
//! conversion.

use crate::error::{InventoryError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Removes every key starting with `prefix`.
    fn clear(&self, prefix: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Products,
    Stocks,
    Sales,
    Documents,
    ProductDrafts,
    AuthState,
    Theme,
    Notifications,
}

impl StoreKey {
    #[cfg(test)]
    pub const ALL: [StoreKey; 8] = [
        StoreKey::Products,
        StoreKey::Stocks,
        StoreKey::Sales,
        StoreKey::Documents,
        StoreKey::ProductDrafts,
        StoreKey::AuthState,
        StoreKey::Theme,
        StoreKey::Notifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Products => "products",
            StoreKey::Stocks => "stocks",
            StoreKey::Sales => "sales",
            StoreKey::Documents => "documents",
            StoreKey::ProductDrafts => "product-drafts",
            StoreKey::AuthState => "auth-state",
            StoreKey::Theme => "theme",
            StoreKey::Notifications => "notifications",
        }
    }

    pub fn namespaced(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.as_str())
    }
}

/// Outcome of reading a typed value. Corrupt data is reported, not raised,
/// so callers can pick their own fallback.
#[derive(Debug)]
pub enum Loaded<T> {
    Missing,
    Corrupt,
    Present(T),
}

impl<T> Loaded<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Loaded::Present(value) => Some(value),
            Loaded::Missing | Loaded::Corrupt => None,
        }
    }
}

/// A backend plus the namespace every key is written under. Cheap to clone;
/// the session and the inventory each hold one.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn load<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Loaded<T>> {
        let full_key = key.namespaced(&self.prefix);
        let Some(raw) = self.backend.get(&full_key)? else {
            return Ok(Loaded::Missing);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Loaded::Present(value)),
            Err(e) => {
                tracing::warn!(key = %full_key, error = %e, "Discarding unreadable stored value");
                Ok(Loaded::Corrupt)
            }
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<()> {
        let full_key = key.namespaced(&self.prefix);
        let raw = serde_json::to_string(value)?;
        self.backend.set(&full_key, &raw)?;
        tracing::debug!(key = %full_key, bytes = raw.len(), "Persisted value");
        Ok(())
    }

    pub fn remove(&self, key: StoreKey) -> Result<()> {
        self.backend.remove(&key.namespaced(&self.prefix))
    }

    /// Raw stored text, bypassing deserialization.
    #[cfg(test)]
    pub fn raw(&self, key: StoreKey) -> Result<Option<String>> {
        self.backend.get(&key.namespaced(&self.prefix))
    }

    #[cfg(test)]
    pub fn write_raw(&self, key: StoreKey, value: &str) -> Result<()> {
        self.backend.set(&key.namespaced(&self.prefix), value)
    }

    /// Drops every key in this namespace, leaving other namespaces alone.
    pub fn clear_all(&self) -> Result<()> {
        self.backend.clear(&format!("{}-", self.prefix))
    }
}

/// In-process store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().map_err(|_| InventoryError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| InventoryError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| InventoryError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn clear(&self, prefix: &str) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|_| InventoryError::LockPoisoned)?;
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(())
    }
}
