//! Disk cache for geocoding and forecast responses
//!
//! Entries are JSON files carrying an expiry timestamp. Expired entries are
//! still handed back (flagged `is_expired`) so a client can fall back to them
//! when the API is unreachable.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-user cache directory
const APP_NAME: &str = "skycast";

/// On-disk layout of a cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    data: T,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// A cache read, with freshness metadata
#[derive(Debug)]
pub struct CachedData<T> {
    pub data: T,
    /// When the data was written
    pub cached_at: DateTime<Utc>,
    pub is_expired: bool,
}

/// Reads and writes cache entries under one directory
///
/// Defaults to the platform cache directory (`~/.cache/skycast/` on Linux).
#[derive(Debug, Clone)]
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Cache manager rooted in the platform cache directory
    ///
    /// Returns `None` when no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", APP_NAME)?;
        Some(Self {
            cache_dir: project_dirs.cache_dir().to_path_buf(),
        })
    }

    /// Cache manager rooted in `cache_dir`
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory holding the cache files
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Creates the cache directory if it does not exist yet
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes `data` under `key`, fresh for `ttl_hours`
    pub fn write<T: Serialize>(&self, key: &str, data: &T, ttl_hours: u64) -> std::io::Result<()> {
        self.ensure_dir()?;

        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now + Duration::hours(ttl_hours as i64),
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(self.cache_path(key), json)
    }

    /// Reads the entry stored under `key`
    ///
    /// Returns `None` when the entry is missing or no longer parses as `T`
    /// (for example after a payload format change).
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let content = fs::read_to_string(self.cache_path(key)).ok()?;
        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("Ignoring unreadable cache entry {}: {}", key, e);
                return None;
            }
        };

        Some(CachedData {
            data: entry.data,
            cached_at: entry.cached_at,
            is_expired: Utc::now() > entry.expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{sample_city, sample_forecast};
    use crate::data::{CurrentCityInfo, RawForecast};
    use std::thread;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[test]
    fn test_write_creates_json_file() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .write("geocode_berlin", &sample_city(), 24)
            .expect("Write should succeed");

        let path = temp_dir.path().join("geocode_berlin.json");
        let content = fs::read_to_string(&path).expect("Should read file");
        assert!(content.contains("\"Berlin\""));
        assert!(content.contains("\"expires_at\""));
    }

    #[test]
    fn test_read_missing_key() {
        let (cache, _temp_dir) = create_test_cache();
        let result: Option<CachedData<CurrentCityInfo>> = cache.read("nonexistent");
        assert!(result.is_none());
    }

    #[test]
    fn test_read_fresh_forecast() {
        let (cache, _temp_dir) = create_test_cache();

        cache
            .write("forecast_52.52_13.41", &sample_forecast(), 1)
            .expect("Write should succeed");
        let result: CachedData<RawForecast> =
            cache.read("forecast_52.52_13.41").expect("Should read cache");

        assert_eq!(result.data, sample_forecast());
        assert!(!result.is_expired);
    }

    #[test]
    fn test_read_expired_entry_is_flagged() {
        let (cache, _temp_dir) = create_test_cache();

        cache.write("stale", &sample_city(), 0).expect("Write should succeed");
        thread::sleep(StdDuration::from_millis(10));

        let result: CachedData<CurrentCityInfo> = cache.read("stale").expect("Should read cache");
        assert_eq!(result.data, sample_city());
        assert!(result.is_expired);
    }

    #[test]
    fn test_expired_forecast_is_still_returned() {
        let (cache, _temp_dir) = create_test_cache();

        cache
            .write("forecast_52.52_13.41", &sample_forecast(), 0)
            .expect("Write should succeed");
        thread::sleep(StdDuration::from_millis(10));

        let result: CachedData<RawForecast> = cache
            .read("forecast_52.52_13.41")
            .expect("expired entries stay readable");
        assert!(result.is_expired);
        assert_eq!(result.data, sample_forecast());
        assert_eq!(result.data.day_count(), 7);
    }

    #[test]
    fn test_read_wrong_shape_is_none() {
        let (cache, _temp_dir) = create_test_cache();

        cache.write("city", &sample_city(), 24).expect("Write should succeed");
        let result: Option<CachedData<RawForecast>> = cache.read("city");

        assert!(result.is_none());
    }

    #[test]
    fn test_cached_at_timestamp_is_recorded() {
        let (cache, _temp_dir) = create_test_cache();

        let before = Utc::now();
        cache.write("ts", &sample_city(), 24).expect("Write should succeed");
        let after = Utc::now();

        let result: CachedData<CurrentCityInfo> = cache.read("ts").expect("Should read cache");
        assert!(result.cached_at >= before);
        assert!(result.cached_at <= after);
    }

    #[test]
    fn test_write_creates_nested_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("a").join("b");
        let cache = CacheManager::with_dir(nested.clone());

        cache.write("k", &sample_city(), 24).expect("Write should succeed");

        assert!(nested.join("k.json").exists());
        assert_eq!(cache.dir(), nested.as_path());
    }

    #[test]
    fn test_new_uses_app_directory() {
        if let Some(cache) = CacheManager::new() {
            assert!(cache.dir().to_string_lossy().contains(APP_NAME));
        }
        // new() returns None without a home directory (CI)
    }
}
