//! Persisted key-value storage.
//!
//! The UI persists a handful of strings (remember-me flag, saved credentials,
//! session token) across restarts. The trait is synchronous and tiny; callers
//! decide what a failure means for them.

#![allow(clippy::disallowed_types, reason = "Synchronous storage operations only")]

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use crate::StoreError;

/// String key-value storage.
///
/// Must be Clone (the session and tests hold the same store). Implementations
/// share state via Arc, so clones see each other's writes.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    /// Value for `key`. `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set `key` to `value`, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

type Entries = HashMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> Result<MutexGuard<'_, Entries>, StoreError> {
    entries.lock().map_err(|_| StoreError::Poisoned)
}

/// In-memory store for tests and preview runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Entries>>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `entries`.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { entries: Arc::new(Mutex::new(entries)) }
    }

    /// Copy of every entry.
    pub fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        Ok(lock(&self.entries)?.clone())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries)?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        lock(&self.entries)?.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    entries: Arc<Mutex<Entries>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => Entries::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => Entries::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, entries: Arc::new(Mutex::new(entries)) })
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.entries)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = lock(&self.entries)?;
        let mut next = entries.clone();
        next.insert(key.to_owned(), value.to_owned());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = lock(&self.entries)?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clones_share_entries() {
        let store = MemoryStore::new();
        let clone = store.clone();

        store.set("session_token", "abc").expect("set");
        assert_eq!(clone.get("session_token").expect("get").as_deref(), Some("abc"));

        clone.remove("session_token").expect("remove");
        assert_eq!(store.get("session_token").expect("get"), None);
    }

    #[test]
    fn removing_absent_key_is_fine() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");

        let store = FileStore::open(&path).expect("open");
        store.set("remember_me", "true").expect("set");
        store.set("saved_email", "a@x.com").expect("set");
        store.remove("saved_email").expect("remove");

        let reopened = FileStore::open(&path).expect("reopen");
        assert_eq!(reopened.get("remember_me").expect("get").as_deref(), Some("true"));
        assert_eq!(reopened.get("saved_email").expect("get"), None);
    }

    #[test]
    fn failed_write_leaves_entries_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("store.json");
        let store = FileStore::open(&path).expect("open");

        assert!(matches!(store.set("remember_me", "true"), Err(StoreError::Io(_))));
        assert_eq!(store.get("remember_me").expect("get"), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("store.json");
        fs::write(&path, b"[1, 2, 3]").expect("write");

        assert!(matches!(FileStore::open(&path), Err(StoreError::Corrupt(_))));
    }
}
