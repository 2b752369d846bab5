//! Client-side persistence of user interaction state.
//!
//! Everything goes through [`KeyValueStore`] so the browser's localStorage can
//! be swapped for another backend without touching call sites. Reads never
//! fail from the caller's point of view: missing or corrupt values come back
//! as the type's default and the problem is logged.

pub mod history;
pub mod interactions;
pub mod notifier;

use crate::error::StorageError;
use gloo_storage::{LocalStorage, Storage};
use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::{HashMap, HashSet};
#[cfg(test)]
use std::rc::Rc;

pub use history::{group_by_day, WatchHistory};
pub use interactions::InteractionStore;
pub use notifier::ChangeNotifier;

pub const LIKED_VIDEOS_KEY: &str = "likedVideos";
pub const DISLIKED_VIDEOS_KEY: &str = "dislikedVideos";
pub const SUBSCRIBED_CHANNELS_KEY: &str = "subscribedChannels";
pub const WATCH_HISTORY_KEY: &str = "watchHistory";
pub const HISTORY_PAUSED_KEY: &str = "historyPaused";

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`, shared by every tab of the same origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserStore;

fn js_error(err: wasm_bindgen::JsValue) -> StorageError {
    StorageError::Backend(format!("{err:?}"))
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw().get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw().set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        LocalStorage::raw().remove_item(key).map_err(js_error)
    }
}

/// In-process store for tests. Clones share the same map, which lets two
/// handles act like two tabs over one origin.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
    read_only: Rc<Cell<bool>>,
    failing_keys: Rc<RefCell<HashSet<String>>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(self, key: &str, raw: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), raw.to_string());
        self
    }

    /// Makes every write fail, like a full or disabled localStorage.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.set(read_only);
    }

    /// Makes writes to one key fail while the others keep working.
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.borrow_mut().insert(key.to_string());
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only.get() || self.failing_keys.borrow().contains(key) {
            return Err(StorageError::Backend(format!("quota exceeded writing '{key}'")));
        }
        Ok(())
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn read_json<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    match store.get_item(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable value under '{key}': {e}");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::error!("Error reading '{key}': {e}");
            T::default()
        }
    }
}

pub fn write_json<S, T>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_corrupt_values_read_as_default() {
        let store = MemoryStore::new().with_raw(LIKED_VIDEOS_KEY, "{not json");
        let liked: Vec<String> = read_json(&store, LIKED_VIDEOS_KEY);
        let disliked: Vec<String> = read_json(&store, DISLIKED_VIDEOS_KEY);
        assert!(liked.is_empty());
        assert!(disliked.is_empty());
    }

    #[test]
    fn wrong_shape_reads_as_default() {
        let store = MemoryStore::new().with_raw(SUBSCRIBED_CHANNELS_KEY, r#"{"a":1}"#);
        let channels: Vec<String> = read_json(&store, SUBSCRIBED_CHANNELS_KEY);
        assert!(channels.is_empty());
    }

    #[test]
    fn write_then_read() {
        let store = MemoryStore::new();
        write_json(&store, LIKED_VIDEOS_KEY, &["v1", "v2"]).unwrap();
        assert_eq!(store.raw(LIKED_VIDEOS_KEY).as_deref(), Some(r#"["v1","v2"]"#));
        let liked: Vec<String> = read_json(&store, LIKED_VIDEOS_KEY);
        assert_eq!(liked, vec!["v1", "v2"]);
    }

    #[test]
    fn read_only_store_rejects_writes() {
        let store = MemoryStore::new();
        store.set_read_only(true);
        assert!(write_json(&store, LIKED_VIDEOS_KEY, &["v1"]).is_err());
        assert!(store.raw(LIKED_VIDEOS_KEY).is_none());
    }
}
