// Cache store for reading and writing cached entries.
// Key-value backends plus JSON serialization and TTL checking of entries.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Result, ShowcaseError};

use super::paths::entry_path;

/// Default TTL for repository listings: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached data.
    pub data: T,
    /// When the data was fetched from upstream.
    pub fetched_at: DateTime<Utc>,
    /// How long the data stays fresh.
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, fetched_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            data,
            fetched_at,
            ttl,
        }
    }

    /// Fresh iff `now - fetched_at < ttl`. A timestamp in the future counts as
    /// expired so a skewed clock can't pin an entry forever.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now
            .signed_duration_since(self.fetched_at)
            .to_std()
            .unwrap_or(Duration::MAX);

        elapsed < self.ttl
    }
}

/// String-keyed, string-valued durable storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and decode an entry. Missing keys are `Ok(None)`.
pub fn read_entry<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<CacheEntry<T>>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode and write an entry, replacing any previous value.
pub fn write_entry<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    entry: &CacheEntry<T>,
) -> Result<()> {
    let json = serde_json::to_string(entry)?;
    store.set(key, &json)
}

/// One file per key under a directory, written atomically.
pub struct FileStore {
    dir: PathBuf,
    // Serializes writers so two temp files for one key never race on rename.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| ShowcaseError::Other("file store lock poisoned".to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = entry_path(&self.dir, key);
        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock()?;
        fs::create_dir_all(&self.dir)?;

        // Write atomically via temp file
        let path = entry_path(&self.dir, key);
        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock()?;
        let path = entry_path(&self.dir, key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store, mostly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|entries| entries.contains_key(key))
            .unwrap_or(false)
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| ShowcaseError::Other("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_write_and_read_entry() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("store"));

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let entry = CacheEntry::new(data.clone(), Utc::now(), DEFAULT_TTL);

        write_entry(&store, "github-repos-test", &entry).unwrap();

        let cached: Option<CacheEntry<TestData>> = read_entry(&store, "github-repos-test").unwrap();
        let cached = cached.unwrap();
        assert_eq!(cached.data, data);
        assert_eq!(cached.ttl, DEFAULT_TTL);
        assert!(!temp_dir.path().join("store/github-repos-test.tmp").exists());
    }

    #[test]
    fn test_fresh_until_ttl() {
        let fetched_at = Utc::now();
        let entry = CacheEntry::new("test", fetched_at, Duration::from_secs(300));

        assert!(entry.is_fresh(fetched_at));
        assert!(entry.is_fresh(fetched_at + chrono::Duration::seconds(299)));
        assert!(!entry.is_fresh(fetched_at + chrono::Duration::seconds(300)));
        assert!(!entry.is_fresh(fetched_at + chrono::Duration::seconds(600)));
    }

    #[test]
    fn test_future_timestamp_is_expired() {
        let now = Utc::now();
        let entry = CacheEntry::new("test", now + chrono::Duration::hours(1), DEFAULT_TTL);

        assert!(!entry.is_fresh(now));
    }

    #[test]
    fn test_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        let cached: Option<CacheEntry<TestData>> = read_entry(&store, "missing").unwrap();
        assert!(cached.is_none());
        // Removing a missing key is fine
        store.remove("missing").unwrap();
    }

    #[test]
    fn test_corrupt_entry_is_an_error() {
        let store = MemoryStore::new();
        store.set("github-repos-bad", "{not json").unwrap();

        let result: Result<Option<CacheEntry<TestData>>> = read_entry(&store, "github-repos-bad");
        assert!(result.is_err());
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.set("k", "v").unwrap();
        assert!(store.contains("k"));

        store.remove("k").unwrap();
        assert!(!store.contains("k"));
        assert_eq!(store.get("k").unwrap(), None);
    }
}
