//! Key-value storage port (the `localStorage` contract).
//!
//! Values are JSON strings. Reads re-fetch and re-parse every time; writes
//! replace the whole value under a key.

use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Ошибки доступа к хранилищу
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage is not available: {0}")]
    Unavailable(String),

    #[error("Failed to read '{key}': {message}")]
    Read { key: String, message: String },

    #[error("Failed to write '{key}': {message}")]
    Write { key: String, message: String },

    #[error("Failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed blob store with `get`/`set`/`remove`.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Read a key and parse it as JSON.
///
/// A missing key and unparseable content both yield `Ok(None)`; only storage
/// access failures are errors.
pub fn read_json_value(
    storage: &dyn KeyValueStorage,
    key: &str,
) -> Result<Option<Value>, StorageError> {
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Malformed JSON in storage, using defaults");
            Ok(None)
        }
    }
}

/// Serialize `value` and replace the content of `key`.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let text = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set_item(key, &text)
}

/// Decode each element of a JSON array independently, dropping the ones with a wrong shape.
pub fn decode_entries<T: serde::de::DeserializeOwned>(key: &str, value: Option<Value>) -> Vec<T> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<T>(entry) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Skipping malformed entry");
                    None
                }
            })
            .collect(),
        Some(_) => {
            tracing::warn!(key, "Expected a JSON array, using an empty list");
            Vec::new()
        }
    }
}

/// In-memory storage (tests, previews).
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with raw values
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let storage = Self::new();
        storage.items.borrow_mut().extend(
            items
                .into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }

    #[test]
    fn test_read_json_value_malformed() {
        let storage = MemoryStorage::with_items([("k", "{not json")]);
        assert_eq!(read_json_value(&storage, "k").unwrap(), None);
        assert_eq!(read_json_value(&storage, "missing").unwrap(), None);
    }

    #[test]
    fn test_decode_entries_skips_bad_shapes() {
        let decoded: Vec<u32> = decode_entries("k", Some(json!([1, "two", 3])));
        assert_eq!(decoded, vec![1, 3]);
        let decoded: Vec<u32> = decode_entries("k", Some(json!({"a": 1})));
        assert!(decoded.is_empty());
    }
}
