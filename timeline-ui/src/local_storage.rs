#![cfg(target_arch = "wasm32")]

use timeline_core::{KeyValueStore, TimelineError};
use web_sys::Storage;

/// `window.localStorage` qua trait `KeyValueStore`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<Storage, TimelineError> {
        web_sys::window()
            .ok_or_else(|| TimelineError::Storage("Không có window".to_string()))?
            .local_storage()
            .map_err(|err| TimelineError::Storage(format!("{err:?}")))?
            .ok_or_else(|| TimelineError::Storage("localStorage không khả dụng".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, TimelineError> {
        Self::storage()?
            .get_item(key)
            .map_err(|err| TimelineError::Storage(format!("{err:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimelineError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|err| TimelineError::Storage(format!("{err:?}")))
    }

    fn remove(&mut self, key: &str) -> Result<(), TimelineError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|err| TimelineError::Storage(format!("{err:?}")))
    }
}
