//! The key-value persistence contract.
//!
//! The gacha only needs `get`, `set`, and `remove` over JSON values. How the
//! values are kept is up to the implementation:
//! - [`MemoryStore`]: a `HashMap`, for tests and throwaway sessions
//! - [`JsonFileStore`]: one JSON file per key in a directory

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};

/// Keys the gacha reads and writes.
pub mod keys {
    /// The card catalog.
    pub const CATALOG: &str = "all_cards";
    /// Map of card id to collection entry.
    pub const COLLECTION: &str = "cards_collection";
    /// Current draw-credit balance.
    pub const CREDITS: &str = "draw_credits";
    /// Timestamp of the most recent draw.
    pub const LAST_DRAW: &str = "last_draw_time";
    /// Timestamp of the most recent daily claim.
    pub const LAST_DAILY_CREDIT: &str = "last_daily_credit";

    /// Every key owned by the gacha.
    pub const ALL: [&str; 5] = [CATALOG, COLLECTION, CREDITS, LAST_DRAW, LAST_DAILY_CREDIT];
}

/// Durable get/set/remove by string key.
///
/// Writes are last-write-wins with no cross-key atomicity. A single caller is
/// assumed; sharing one store between writers needs external serialization.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Replace the value under `key`.
    fn set(&mut self, key: &str, value: Value) -> StoreResult<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Typed helpers over any [`KeyValueStore`].
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and decode the value under `key`.
    fn load<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Json {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Encode and write `value` under `key`.
    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> StoreResult<()> {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        self.set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_decodes_typed_value() {
        let mut store = MemoryStore::new();
        store.save("n", &42u32).unwrap();
        assert_eq!(store.load::<u32>("n").unwrap(), Some(42));
        assert_eq!(store.load::<u32>("missing").unwrap(), None);
    }

    #[test]
    fn load_reports_type_mismatch() {
        let mut store = MemoryStore::new();
        store.save("n", "not a number").unwrap();
        let err = store.load::<u32>("n").unwrap_err();
        assert!(matches!(err, StoreError::Json { ref key, .. } if key == "n"));
    }

    #[test]
    fn contains_tracks_set_and_remove() {
        let mut store = MemoryStore::new();
        assert!(!store.contains("k").unwrap());
        store.save("k", &true).unwrap();
        assert!(store.contains("k").unwrap());
        store.remove("k").unwrap();
        assert!(!store.contains("k").unwrap());
    }
}
