use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use super::ClientError;

pub const SERVICES_KEY: &str = "services";
pub const PRICES_KEY: &str = "prices";
pub const ADMIN_TOKEN_KEY: &str = "adminToken";
pub const THEME_KEY: &str = "theme";
pub const VISIT_COUNT_KEY: &str = "visitCount";

pub const THEMES: [&str; 4] = ["blue", "green", "orange", "purple"];
pub const DEFAULT_THEME: &str = "blue";

/// Flat string key/value store persisted as a JSON object.
///
/// Every write is flushed to disk immediately. Values are best-effort: a
/// corrupt or unreadable file starts the store empty.
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ClientError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring corrupt local store");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store under the platform's local data directory.
    pub fn open_default() -> Result<Self, ClientError> {
        Self::open(default_store_path())
    }

    /// Store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), ClientError> {
        let mut entries = self.lock();
        entries.insert(key.to_string(), value.into());
        self.persist(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    /// Decodes a JSON value; anything unparsable reads as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Cached value is not valid JSON");
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ClientError> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, encoded)
    }

    /// Bumps the visit counter and returns the new count.
    pub fn record_visit(&self) -> Result<u64, ClientError> {
        let mut entries = self.lock();
        let count = entries
            .get(VISIT_COUNT_KEY)
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0)
            + 1;
        entries.insert(VISIT_COUNT_KEY.to_string(), count.to_string());
        self.persist(&entries)?;
        Ok(count)
    }

    pub fn theme(&self) -> String {
        self.get(THEME_KEY)
            .filter(|t| THEMES.contains(&t.as_str()))
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    }

    pub fn set_theme(&self, theme: &str) -> Result<(), ClientError> {
        if !THEMES.contains(&theme) {
            return Err(ClientError::Validation(format!("Unknown theme: {}", theme)));
        }
        self.set(THEME_KEY, theme)
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), ClientError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shop-catalog")
        .join("local_store.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let store = LocalStore::open(&path).unwrap();
        store.set(THEME_KEY, "green").unwrap();
        store.set_json(PRICES_KEY, &vec![1, 2, 3]).unwrap();
        drop(store);

        let reopened = LocalStore::open(&path).unwrap();
        assert_eq!(reopened.theme(), "green");
        assert_eq!(reopened.get_json::<Vec<i32>>(PRICES_KEY), Some(vec![1, 2, 3]));
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = LocalStore::open(&path).unwrap();
        assert!(store.get(SERVICES_KEY).is_none());
    }

    #[test]
    fn visit_counter_increments() {
        let store = LocalStore::in_memory();
        assert_eq!(store.record_visit().unwrap(), 1);
        assert_eq!(store.record_visit().unwrap(), 2);
        assert_eq!(store.get(VISIT_COUNT_KEY).as_deref(), Some("2"));
    }

    #[test]
    fn unknown_theme_is_refused() {
        let store = LocalStore::in_memory();
        assert_eq!(store.theme(), DEFAULT_THEME);
        assert!(matches!(store.set_theme("pink"), Err(ClientError::Validation(_))));
        store.set_theme("purple").unwrap();
        assert_eq!(store.theme(), "purple");
    }

    #[test]
    fn malformed_json_value_reads_as_absent() {
        let store = LocalStore::in_memory();
        store.set(SERVICES_KEY, "oops").unwrap();
        assert!(store.get_json::<Vec<String>>(SERVICES_KEY).is_none());
    }
}
