//! Lớp lưu trữ key-value cục bộ (localStorage trên trình duyệt, file JSON trên CLI).

use std::collections::BTreeMap;

use crate::TimelineError;

/// Khóa lưu danh sách sự kiện.
pub const EVENTS_KEY: &str = "lifeEvents";
/// Khóa lưu cấu hình timeline.
pub const CONFIG_KEY: &str = "timelineConfig";

/// Kho key-value kiểu chuỗi, tương tự `window.localStorage`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimelineError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TimelineError>;
    fn remove(&mut self, key: &str) -> Result<(), TimelineError>;
}

/// Kho trong bộ nhớ, dùng cho test và làm nền cho kho dạng file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimelineError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimelineError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TimelineError> {
        self.entries.remove(key);
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, TimelineError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimelineError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), TimelineError> {
        (**self).remove(key)
    }
}
