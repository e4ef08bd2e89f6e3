//! Storage layer
//!
//! A small key-value boundary between in-memory state and durable storage.
//!
//! ## Architecture
//!
//! - **`KeyValueStore`**: string values under string keys (`FileStore` on
//!   disk, `MemoryStore` for tests)
//! - **`load` / `save`**: JSON on top of a store. Both are infallible from
//!   the caller's view: a failed load yields the caller's fallback, a failed
//!   save is logged and dropped.

pub mod error;
pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the JSON array of articles
pub const ARTICLES_KEY: &str = "club_articles";

/// Key holding the JSON array of newsletter issues
pub const NEWSLETTERS_KEY: &str = "club_newsletters";

/// Durable string storage addressed by key
pub trait KeyValueStore {
    /// Read the value under `key`; `Ok(None)` if absent
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// Load and deserialize the value under `key`
///
/// Returns `fallback` unchanged if the key is absent, the store cannot be
/// read, or the stored JSON does not deserialize into `T`.
pub fn load<T, S>(store: &S, key: &str, fallback: T) -> T
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored value for '{}', using fallback", key);
            return fallback;
        }
        Err(e) => {
            warn!("Failed to read '{}': {}", key, e);
            return fallback;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored value for '{}' is not valid: {}", key, e);
            fallback
        }
    }
}

/// Serialize `value` and write it under `key`
///
/// Failures are logged and swallowed; returns whether the write landed.
pub fn save<T, S>(store: &mut S, key: &str, value: &T) -> bool
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize '{}': {}", key, e);
            return false;
        }
    };

    match store.set(key, &json) {
        Ok(()) => {
            debug!("Saved '{}' ({} bytes)", key, json.len());
            true
        }
        Err(e) => {
            match e.recovery_suggestion() {
                Some(hint) => warn!("Failed to save '{}': {} ({})", key, e, hint),
                None => warn!("Failed to save '{}': {}", key, e),
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Store whose reads always fail
    struct Unreadable;

    impl KeyValueStore for Unreadable {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn test_load_missing_key_returns_fallback() {
        let store = MemoryStore::new();
        let value: Vec<String> = load(&store, "missing", vec!["default".to_string()]);
        assert_eq!(value, vec!["default"]);
    }

    #[test]
    fn test_load_invalid_json_returns_fallback() {
        let mut store = MemoryStore::new();
        store.insert_raw("k", "[1, 2, ");
        let value: Vec<i32> = load(&store, "k", vec![42]);
        assert_eq!(value, vec![42]);
    }

    #[test]
    fn test_load_wrong_shape_returns_fallback() {
        let mut store = MemoryStore::new();
        // Valid JSON, wrong type: no partially-parsed value leaks through
        store.insert_raw("k", r#"[1, "two", 3]"#);
        let value: Vec<i32> = load(&store, "k", vec![]);
        assert!(value.is_empty());
    }

    #[test]
    fn test_load_unreadable_store_returns_fallback() {
        let value: Vec<i32> = load(&Unreadable, "k", vec![7]);
        assert_eq!(value, vec![7]);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        assert!(save(&mut store, "k", &vec![1, 2, 3]));
        let value: Vec<i32> = load(&store, "k", vec![]);
        assert_eq!(value, vec![1, 2, 3]);
    }

    #[test]
    fn test_save_failure_is_swallowed() {
        let mut store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(!save(&mut store, "k", &vec![1]));
        assert!(!save(&mut Unreadable, "k", &vec![1]));
    }
}
