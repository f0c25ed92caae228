//! Response caching for API requests
//!
//! Two-tier cache for GET responses:
//! - L1: in-memory LRU cache, always on for a caching transport
//! - L2: file system persistence, opt-in
//!
//! Entity tables have their own lifetime cache in the store; this layer only
//! spares repeated identical requests within (and, with the disk tier,
//! across) client instances.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::hash_map::DefaultHasher,
    fs,
    hash::{Hash, Hasher},
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Cache key usable for both memory and disk tiers
pub trait CacheKey: Hash + Eq + Clone {
    /// String representation for file system storage
    fn to_file_key(&self) -> String;

    /// File path for this cache entry
    fn to_file_path(&self) -> PathBuf {
        let base = dirs::cache_dir().unwrap_or_else(|| {
            let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.push(".cache");
            home
        });
        base.join("itscalledsoccer")
            .join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for a single GET request: full URL plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl RequestKey {
    pub fn new(url: &str, params: &[(String, String)]) -> Self {
        Self {
            url: url.to_string(),
            params: params.to_vec(),
        }
    }
}

impl CacheKey for RequestKey {
    fn to_file_key(&self) -> String {
        // Keep the endpoint tail readable, hash the rest to bound the name
        let tail: String = self
            .url
            .rsplit('/')
            .take(2)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("_");
        let tail: String = tail
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();

        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);

        format!("response_{}_{:016x}", tail, hasher.finish())
    }
}

/// LRU memory cache with optional file system persistence
#[derive(Debug)]
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Mutex<LruCache<K, V>>,
    memory_capacity: usize,
    disk: bool,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a cache with the given memory capacity; `disk` enables the
    /// persistent tier.
    pub fn new(memory_capacity: usize, disk: bool) -> Self {
        Self {
            memory_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN),
            )),
            memory_capacity,
            disk,
        }
    }

    /// Get an item from cache (memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory_cache.lock().unwrap().get(key) {
            return Some(value.clone());
        }

        if !self.disk {
            return None;
        }

        // Promote disk hits to the memory tier
        if let Some(value) = self.get_from_disk(key) {
            self.memory_cache
                .lock()
                .unwrap()
                .put(key.clone(), value.clone());
            return Some(value);
        }

        None
    }

    /// Put an item into cache (both tiers when disk is enabled)
    pub fn put(&self, key: K, value: V) {
        self.memory_cache
            .lock()
            .unwrap()
            .put(key.clone(), value.clone());

        if self.disk {
            let _ = self.put_to_disk(&key, &value);
        }
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let path = key.to_file_path();
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let path = key.to_file_path();
        let content = serde_json::to_string(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Clear the memory tier (keeps any disk entries)
    pub fn clear_memory(&self) {
        self.memory_cache.lock().unwrap().clear();
    }

    /// Remove the disk entry for a specific key
    pub fn invalidate_disk_cache(&self, key: &K) -> std::io::Result<()> {
        let path = key.to_file_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// (used, capacity) for the memory tier
    pub fn memory_stats(&self) -> (usize, usize) {
        let cache = self.memory_cache.lock().unwrap();
        (cache.len(), self.memory_capacity)
    }
}

/// GET-response cache used by the transport.
pub type ResponseCache = UnifiedCache<RequestKey, Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_try_read_to_string_existing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.txt");

        fs::write(&file_path, "hello world").unwrap();

        let content = try_read_to_string(&file_path);
        assert_eq!(content, Some("hello world".to_string()));
    }

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nonexistent.txt");

        let content = try_read_to_string(&file_path);
        assert_eq!(content, None);
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("subdir").join("output.txt");

        write_string(&file_path, "test content").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "test content");
    }

    #[test]
    fn test_request_key_is_stable_and_distinct() {
        let params = vec![("season_name".to_string(), "2021".to_string())];
        let key = RequestKey::new("https://example.com/mls/players/xgoals", &params);
        let same = RequestKey::new("https://example.com/mls/players/xgoals", &params);
        let other = RequestKey::new("https://example.com/nwsl/players/xgoals", &params);

        assert_eq!(key.to_file_key(), same.to_file_key());
        assert_ne!(key.to_file_key(), other.to_file_key());
        assert!(key.to_file_key().contains("players_xgoals"));
    }

    #[test]
    fn test_memory_cache_hit_and_eviction() {
        let cache: UnifiedCache<RequestKey, Value> = UnifiedCache::new(2, false);

        let key1 = RequestKey::new("https://example.com/a", &[]);
        let key2 = RequestKey::new("https://example.com/b", &[]);
        let key3 = RequestKey::new("https://example.com/c", &[]);

        cache.put(key1.clone(), Value::from(1));
        assert_eq!(cache.get(&key1), Some(Value::from(1)));

        cache.put(key2.clone(), Value::from(2));
        cache.put(key3.clone(), Value::from(3));

        let stats = cache.memory_stats();
        assert_eq!(stats.0, 2);
        assert_eq!(stats.1, 2);

        // key1 was least recently used once key2/key3 arrived
        assert_eq!(cache.get(&key1), None);
    }

    #[test]
    fn test_disk_tier_disabled_by_default_path() {
        let cache: UnifiedCache<RequestKey, Value> = UnifiedCache::new(1, false);

        let key = RequestKey::new("https://example.com/no-disk", &[]);
        cache.put(key.clone(), Value::from("x"));
        cache.clear_memory();

        // Nothing survives a memory clear when the disk tier is off
        assert_eq!(cache.get(&key), None);
    }
}
