use crate::error::{FetchError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Host-provided key-value store for the widget's persisted fields.
///
/// Values are plain strings, unversioned, last-write-wins.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

fn lock(values: &Mutex<BTreeMap<String, String>>) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
    values
        .lock()
        .map_err(|_| FetchError::Settings("settings lock poisoned".into()))
}

/// In-memory store, for tests and embedding hosts without persistence.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.values)?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flat TOML table of strings, rewritten in full on every `set`.
#[derive(Debug)]
pub struct FileSettingsStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FileSettingsStore {
    /// Open the store at `path`. A missing file reads as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values: BTreeMap<String, String> = if path.exists() {
            let raw = fs::read_to_string(&path).map_err(|e| {
                FetchError::Settings(format!("failed to read {}: {e}", path.display()))
            })?;
            toml::from_str(&raw).map_err(|e| {
                FetchError::Settings(format!("failed to parse {}: {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                FetchError::Settings(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let toml_str = toml::to_string(values)
            .map_err(|e| FetchError::Settings(format!("failed to serialize settings: {e}")))?;
        fs::write(&self.path, toml_str).map_err(|e| {
            FetchError::Settings(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(lock(&self.values)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = lock(&self.values)?;
        values.insert(key.to_string(), value.to_string());
        self.persist(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemorySettingsStore::new();
        assert!(store.get("api-url").unwrap().is_none());
        store.set("api-url", "https://a.test").unwrap();
        store.set("api-url", "https://b.test").unwrap();
        assert_eq!(store.get("api-url").unwrap().as_deref(), Some("https://b.test"));
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = FileSettingsStore::open(tmp.path().join("settings.toml")).unwrap();
        assert!(store.get("api-key").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn file_store_persists_across_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("settings.toml");

        let store = FileSettingsStore::open(&path).unwrap();
        store.set("api-url", "https://x.test/a?b=1").unwrap();
        store.set("api-method", "POST").unwrap();
        drop(store);

        let reopened = FileSettingsStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("api-url").unwrap().as_deref(),
            Some("https://x.test/a?b=1")
        );
        assert_eq!(reopened.get("api-method").unwrap().as_deref(), Some("POST"));
    }

    #[test]
    fn file_store_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        fs::write(&path, "not = [valid").unwrap();
        let err = FileSettingsStore::open(&path).unwrap_err();
        assert!(matches!(err, FetchError::Settings(_)));
    }
}
