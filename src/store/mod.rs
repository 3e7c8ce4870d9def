//! File-backed local key-value store.
//!
//! Mirrors browser local storage: string keys map to string values, and
//! structured values are stored as JSON text. The whole map lives in one
//! JSON object file that is rewritten atomically (temp file, fsync, rename)
//! on every change, so a crash mid-write leaves the previous file intact.

pub mod error;

pub use error::StoreError;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::xdg;

/// Key holding the bearer token for the remote settings endpoint.
pub const TOKEN_KEY: &str = "tk";

/// Key holding the widget array of tab `tab`.
pub fn widgets_key(tab: u32) -> String {
    format!("userWidgets{tab}")
}

/// Key holding the layout array of tab `tab`.
pub fn layout_key(tab: u32) -> String {
    format!("userLayout{tab}")
}

/// Local key-value store persisted to a single JSON file.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store at `path`. A missing file opens as an empty store.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the file exists but cannot be read, or
    /// `StoreError::Parse` if it is not a JSON object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|e| StoreError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No local store at {:?}, starting empty", path);
                BTreeMap::new()
            }
            Err(e) => return Err(StoreError::Read { path, source: e }),
        };
        Ok(Self { path, entries })
    }

    /// Open the store at the default data location.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(xdg::store_path())
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw string value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store a raw string value and write the file.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    /// Remove `key` and write the file. Returns the old value, if any.
    ///
    /// Removing an absent key does not touch the file.
    pub fn remove(&mut self, key: &str) -> Result<Option<String>, StoreError> {
        let old = self.entries.remove(key);
        if old.is_some() {
            self.flush()?;
        }
        Ok(old)
    }

    /// Decode the JSON value under `key`.
    ///
    /// Returns `None` when the key is absent. A value that fails to decode is
    /// logged and also treated as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring unreadable local value for '{}': {}", key, e);
                None
            }
        }
    }

    /// Decode the JSON value under `key`, falling back to `default`.
    pub fn get_json_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_json(key).unwrap_or(default)
    }

    /// Encode `value` as JSON under `key` and write the file.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.set(key, raw)
    }

    /// Encode several JSON values and write the file once.
    pub fn set_json_many(&mut self, pairs: &[(&str, serde_json::Value)]) -> Result<(), StoreError> {
        for (key, value) in pairs {
            self.entries.insert((*key).to_string(), value.to_string());
        }
        self.flush()
    }

    /// Bearer token for the remote endpoint, if one is stored and non-empty.
    pub fn token(&self) -> Option<&str> {
        self.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    /// Write all entries with temp-file-then-rename.
    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty() && !p.exists())
        {
            xdg::ensure_dir(parent).map_err(|e| StoreError::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| StoreError::Serialize {
            key: String::new(),
            message: e.to_string(),
        })?;

        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.f").to_string();
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "store.json".to_string());
        let temp_path = self
            .path
            .with_file_name(format!("{file_name}.tmp.{timestamp}"));

        let write_err = |source| StoreError::Write {
            path: temp_path.clone(),
            source,
        };
        let mut file = fs::File::create(&temp_path).map_err(write_err)?;
        file.write_all(json.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        tracing::trace!("Local store written to {:?}", self.path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = LocalStore::open(dir.path().join("store.json")).expect("open empty store");
        (dir, store)
    }

    #[test]
    fn test_tab_keys() {
        assert_eq!(widgets_key(0), "userWidgets0");
        assert_eq!(layout_key(3), "userLayout3");
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.get("anything").is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_set_persists_across_reopen() {
        let (_dir, mut store) = temp_store();
        store.set("tk", "abc").expect("set");

        let reopened = LocalStore::open(store.path()).expect("reopen");
        assert_eq!(reopened.get("tk"), Some("abc"));
    }

    #[test]
    fn test_set_creates_parent_directories() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested/deeper/store.json");
        let mut store = LocalStore::open(&path).expect("open");
        store.set("k", "v").expect("set");
        assert!(path.is_file());
    }

    #[test]
    fn test_flush_leaves_no_temp_files() {
        let (dir, mut store) = temp_store();
        store.set("a", "1").expect("set");
        store.set("b", "2").expect("set");
        let names: Vec<_> = fs::read_dir(dir.path())
            .expect("read dir")
            .map(|e| e.expect("entry").file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("store.json")]);
    }

    #[test]
    fn test_json_values_round_trip() {
        let (_dir, mut store) = temp_store();
        store
            .set_json("userWidgets0", &json!([{ "wid": "note-1" }]))
            .expect("set_json");
        let value: serde_json::Value = store.get_json("userWidgets0").expect("present");
        assert_eq!(value[0]["wid"], "note-1");
        // Stored as text, like browser local storage.
        assert_eq!(store.get("userWidgets0"), Some(r#"[{"wid":"note-1"}]"#));
    }

    #[test]
    fn test_get_json_or_falls_back_on_garbage() {
        let (_dir, mut store) = temp_store();
        store.set("userLayout0", "{not json").expect("set");
        let layout: Vec<u32> = store.get_json_or("userLayout0", vec![7]);
        assert_eq!(layout, vec![7]);
    }

    #[test]
    fn test_get_json_or_falls_back_when_missing() {
        let (_dir, store) = temp_store();
        let layout: Vec<u32> = store.get_json_or("userLayout0", vec![1, 2]);
        assert_eq!(layout, vec![1, 2]);
    }

    #[test]
    fn test_remove_returns_old_value() {
        let (_dir, mut store) = temp_store();
        store.set("tk", "abc").expect("set");
        assert_eq!(store.remove("tk").expect("remove"), Some("abc".to_string()));
        assert_eq!(store.remove("tk").expect("remove again"), None);
        let reopened = LocalStore::open(store.path()).expect("reopen");
        assert!(reopened.get("tk").is_none());
    }

    #[test]
    fn test_token_ignores_empty_value() {
        let (_dir, mut store) = temp_store();
        assert!(store.token().is_none());
        store.set(TOKEN_KEY, "").expect("set");
        assert!(store.token().is_none());
        store.set(TOKEN_KEY, "abc").expect("set");
        assert_eq!(store.token(), Some("abc"));
    }

    #[test]
    fn test_set_json_many_writes_all_keys() {
        let (_dir, mut store) = temp_store();
        store
            .set_json_many(&[("a", json!([1])), ("b", json!({ "x": 2 }))])
            .expect("set many");
        let reopened = LocalStore::open(store.path()).expect("reopen");
        assert_eq!(reopened.get("a"), Some("[1]"));
        assert_eq!(reopened.get("b"), Some(r#"{"x":2}"#));
    }

    #[test]
    fn test_open_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").expect("write");
        let err = LocalStore::open(&path).expect_err("array is not a store");
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn test_open_empty_file_is_empty_store() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("store.json");
        fs::write(&path, "").expect("write");
        let store = LocalStore::open(&path).expect("empty file opens");
        assert!(store.get("tk").is_none());
    }

    #[test]
    fn test_open_directory_is_read_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = LocalStore::open(dir.path()).expect_err("directory is not a file");
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
