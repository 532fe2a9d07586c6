//! In-memory dataset cache
//!
//! Datasets are keyed by source identity (the canonical file path) and stay
//! cached until the caller invalidates them. There is no expiry; use
//! [`DatasetCache::is_stale`] to check whether the file changed since load.

use super::{Dataset, DatasetLoader};
use crate::error::Result;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::debug;

/// Identity of a dataset source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKey(PathBuf);

impl SourceKey {
    /// Canonical form of `path`, or `path` itself if it cannot be resolved
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self(path.canonicalize().unwrap_or_else(|_| path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Cache entry with load metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    dataset: Arc<Dataset>,
    loaded_at: DateTime<Utc>,
    /// File modification time at load, when available
    modified: Option<SystemTime>,
}

/// Shared dataset cache; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    entries: Arc<RwLock<HashMap<SourceKey, CacheEntry>>>,
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub total_reviews: usize,
    pub oldest_load: Option<DateTime<Utc>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `path`, loading it on a miss.
    ///
    /// Load errors are returned and nothing is cached.
    pub fn get_or_load<P: AsRef<Path>>(&self, path: P, loader: &DatasetLoader) -> Result<Arc<Dataset>> {
        let key = SourceKey::from_path(&path);

        if let Some(entry) = self.entries.read().get(&key) {
            debug!("Dataset cache hit: {}", key.path().display());
            return Ok(Arc::clone(&entry.dataset));
        }

        debug!("Dataset cache miss: {}", key.path().display());
        let modified = modified_time(key.path());
        let dataset = Arc::new(loader.load(key.path())?);

        let mut entries = self.entries.write();
        // Another handle may have loaded it meanwhile; keep the first
        let entry = entries.entry(key).or_insert_with(|| CacheEntry {
            dataset,
            loaded_at: Utc::now(),
            modified,
        });
        Ok(Arc::clone(&entry.dataset))
    }

    /// Get a cached dataset without loading
    pub fn get<P: AsRef<Path>>(&self, path: P) -> Option<Arc<Dataset>> {
        let key = SourceKey::from_path(path);
        self.entries
            .read()
            .get(&key)
            .map(|entry| Arc::clone(&entry.dataset))
    }

    pub fn contains<P: AsRef<Path>>(&self, path: P) -> bool {
        self.entries.read().contains_key(&SourceKey::from_path(path))
    }

    /// Drop one source. Returns whether it was cached.
    pub fn invalidate<P: AsRef<Path>>(&self, path: P) -> bool {
        let key = SourceKey::from_path(path);
        let removed = self.entries.write().remove(&key).is_some();
        if removed {
            debug!("Dataset cache invalidated: {}", key.path().display());
        }
        removed
    }

    /// Drop every source
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// True when the file was modified after it was cached.
    ///
    /// Uncached sources and files without a readable mtime are not stale.
    pub fn is_stale<P: AsRef<Path>>(&self, path: P) -> bool {
        let key = SourceKey::from_path(path);
        let entries = self.entries.read();
        let Some(entry) = entries.get(&key) else {
            return false;
        };

        match (entry.modified, modified_time(key.path())) {
            (Some(then), Some(now)) => now > then,
            _ => false,
        }
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        CacheStats {
            entries: entries.len(),
            total_reviews: entries.values().map(|e| e.dataset.len()).sum(),
            oldest_load: entries.values().map(|e| e.loaded_at).min(),
        }
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    const HEADER: &str = "rating\tdate\tvariation\tverified_reviews\n";

    fn dataset_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_miss_then_hit() {
        let file = dataset_file(&["5\t2023-01-01\tBlack\tgreat"]);
        let cache = DatasetCache::new();
        let loader = DatasetLoader::default();

        assert!(!cache.contains(file.path()));
        let first = cache.get_or_load(file.path(), &loader).unwrap();
        assert!(cache.contains(file.path()));

        let second = cache.get_or_load(file.path(), &loader).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().entries, 1);
        assert_eq!(cache.stats().total_reviews, 1);
    }

    #[test]
    fn test_cached_until_invalidated() {
        let mut file = dataset_file(&["5\t2023-01-01\tBlack\tgreat"]);
        let cache = DatasetCache::new();
        let loader = DatasetLoader::default();

        assert_eq!(cache.get_or_load(file.path(), &loader).unwrap().len(), 1);

        writeln!(file, "1\t2023-01-02\tWhite\tawful").unwrap();
        file.flush().unwrap();
        assert_eq!(cache.get_or_load(file.path(), &loader).unwrap().len(), 1);

        assert!(cache.invalidate(file.path()));
        assert!(!cache.invalidate(file.path()));
        assert_eq!(cache.get_or_load(file.path(), &loader).unwrap().len(), 2);
    }

    #[test]
    fn test_load_error_not_cached() {
        let file = dataset_file(&["5\tnot-a-date\tBlack\tgreat"]);
        let cache = DatasetCache::new();

        let err = cache
            .get_or_load(file.path(), &DatasetLoader::default())
            .unwrap_err();
        assert!(err.is_input_error());
        assert!(!cache.contains(file.path()));
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn test_clones_share_entries() {
        let file = dataset_file(&["4\t2023-01-01\tBlack\tnice"]);
        let cache = DatasetCache::new();
        let shared = cache.clone();

        cache
            .get_or_load(file.path(), &DatasetLoader::default())
            .unwrap();
        assert!(shared.get(file.path()).is_some());

        shared.clear();
        assert!(cache.get(file.path()).is_none());
    }

    #[test]
    fn test_staleness() {
        let mut file = dataset_file(&["5\t2023-01-01\tBlack\tgreat"]);
        let cache = DatasetCache::new();
        assert!(!cache.is_stale(file.path()));

        cache
            .get_or_load(file.path(), &DatasetLoader::default())
            .unwrap();
        assert!(!cache.is_stale(file.path()));

        // Push the mtime forward explicitly; filesystem timestamp
        // granularity can hide a rewrite within the same tick.
        writeln!(file, "1\t2023-01-02\tWhite\tawful").unwrap();
        file.flush().unwrap();
        let later = SystemTime::now() + Duration::from_secs(60);
        file.as_file().set_modified(later).unwrap();

        assert!(cache.is_stale(file.path()));
    }

    #[test]
    fn test_source_key_canonical() {
        let file = dataset_file(&[]);
        let dir = file.path().parent().unwrap();
        let name = file.path().file_name().unwrap();
        let indirect = dir.join(".").join(name);

        assert_eq!(SourceKey::from_path(file.path()), SourceKey::from_path(&indirect));
    }
}
