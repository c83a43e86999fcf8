//! Kho key-value dạng file JSON, thay cho localStorage khi chạy native.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use timeline_core::{KeyValueStore, MemoryStore, TimelineError};

/// Mỗi lần ghi đều đồng bộ cả file, giống localStorage.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Mở file; file chưa tồn tại được coi là kho rỗng.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TimelineError> {
        let path = path.into();
        let inner = match std::fs::read_to_string(&path) {
            Ok(raw) => {
                let entries: BTreeMap<String, String> = serde_json::from_str(&raw)
                    .map_err(|err| TimelineError::Parse(format!("{}: {err}", path.display())))?;
                MemoryStore::from_entries(entries)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(err) => {
                return Err(TimelineError::Storage(format!("{}: {err}", path.display())));
            }
        };
        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), TimelineError> {
        let json = serde_json::to_string_pretty(self.inner.entries())
            .map_err(|err| TimelineError::Parse(err.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|err| TimelineError::Storage(format!("{}: {err}", parent.display())))?;
        }
        std::fs::write(&self.path, json)
            .map_err(|err| TimelineError::Storage(format!("{}: {err}", self.path.display())))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TimelineError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TimelineError> {
        self.inner.set(key, value)?;
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), TimelineError> {
        self.inner.remove(key)?;
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("life-timeline-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = std::fs::remove_file(&path);

        let mut store = JsonFileStore::open(&path).expect("mở kho");
        assert_eq!(store.get("k").expect("đọc"), None);
        store.set("k", "v").expect("ghi");

        let reopened = JsonFileStore::open(&path).expect("mở lại kho");
        assert_eq!(reopened.get("k").expect("đọc").as_deref(), Some("v"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "not json").expect("ghi file");
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(TimelineError::Parse(_))
        ));
        let _ = std::fs::remove_file(&path);
    }
}
