// Keyed blob cache for catalog responses

use crate::config::Config;
use crate::error::CacheError;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Storage the catalog fetcher reads from and writes to
pub trait CatalogCache: Send + Sync {
    /// Time since the entry was written, or None when absent
    fn age(&self, key: &str) -> Option<Duration>;

    fn read(&self, key: &str) -> Option<Vec<u8>>;

    fn write(&self, key: &str, contents: &[u8]) -> Result<(), CacheError>;

    /// Read-only caches are never written to
    fn is_read_only(&self) -> bool;
}

/// Cache backed by one file per key in a directory
#[derive(Debug, Clone)]
pub struct FileCache {
    cache_dir: PathBuf,
    read_only: bool,
}

impl FileCache {
    /// Create a cache at the location the configuration points to
    pub fn from_config(config: &Config) -> Result<Self, CacheError> {
        let dir = config
            .resolve_cache_dir()
            .ok_or(CacheError::DirResolutionFailed)?;
        Ok(Self::with_dir(dir).read_only(config.cache_read_only))
    }

    /// Create a cache rooted at a specific directory
    pub fn with_dir(path: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: path.into(),
            read_only: false,
        }
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Keys must be a single plain file name
    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) if c == key => Some(self.cache_dir.join(key)),
            _ => None,
        }
    }

    /// Remove a single entry; missing entries are not an error
    pub fn remove(&self, key: &str) -> Result<(), CacheError> {
        let path = self
            .entry_path(key)
            .ok_or_else(|| CacheError::InvalidKey(key.to_string()))?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CacheError::Io { path, source }),
        }
    }
}

impl CatalogCache for FileCache {
    fn age(&self, key: &str) -> Option<Duration> {
        let path = self.entry_path(key)?;
        let modified = std::fs::metadata(path).and_then(|m| m.modified()).ok()?;
        // A timestamp in the future counts as brand new
        Some(
            SystemTime::now()
                .duration_since(modified)
                .unwrap_or(Duration::ZERO),
        )
    }

    fn read(&self, key: &str) -> Option<Vec<u8>> {
        std::fs::read(self.entry_path(key)?).ok()
    }

    fn write(&self, key: &str, contents: &[u8]) -> Result<(), CacheError> {
        let path = self
            .entry_path(key)
            .ok_or_else(|| CacheError::InvalidKey(key.to_string()))?;

        std::fs::create_dir_all(&self.cache_dir).map_err(|source| CacheError::Io {
            path: self.cache_dir.clone(),
            source,
        })?;

        // Write to a sibling first so readers never see a half-written entry
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, contents).map_err(|source| CacheError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| CacheError::Io { path, source })
    }

    fn is_read_only(&self) -> bool {
        self.read_only
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_entry() {
        let temp_dir = tempdir().unwrap();
        let cache = FileCache::with_dir(temp_dir.path());
        assert!(cache.age("pluglist.json").is_none());
        assert!(cache.read("pluglist.json").is_none());
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = tempdir().unwrap();
        let cache = FileCache::with_dir(temp_dir.path().join("nested"));

        cache.write("pluglist.json", b"{}").unwrap();

        assert_eq!(cache.read("pluglist.json").unwrap(), b"{}");
        let age = cache.age("pluglist.json").unwrap();
        assert!(age < Duration::from_secs(60));
        assert!(!temp_dir.path().join("nested/pluglist.tmp").exists());
    }

    #[test]
    fn test_overwrite() {
        let temp_dir = tempdir().unwrap();
        let cache = FileCache::with_dir(temp_dir.path());
        cache.write("pluglist.json", b"old").unwrap();
        cache.write("pluglist.json", b"new").unwrap();
        assert_eq!(cache.read("pluglist.json").unwrap(), b"new");
    }

    #[test]
    fn test_rejects_path_traversal() {
        let temp_dir = tempdir().unwrap();
        let cache = FileCache::with_dir(temp_dir.path());

        for key in ["../escape.json", "a/b.json", "/etc/passwd", ""] {
            assert!(matches!(
                cache.write(key, b"evil"),
                Err(CacheError::InvalidKey(_))
            ));
            assert!(cache.read(key).is_none());
        }
    }

    #[test]
    fn test_remove() {
        let temp_dir = tempdir().unwrap();
        let cache = FileCache::with_dir(temp_dir.path());
        cache.write("pluglist.json", b"{}").unwrap();
        cache.remove("pluglist.json").unwrap();
        assert!(cache.read("pluglist.json").is_none());
        // removing twice is fine
        cache.remove("pluglist.json").unwrap();
    }

    #[test]
    fn test_read_only_flag() {
        let cache = FileCache::with_dir("/nonexistent").read_only(true);
        assert!(cache.is_read_only());
    }

    #[test]
    fn test_from_config_uses_explicit_dir() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/tmp/moodleorg-test")),
            cache_read_only: true,
            ..Config::default()
        };
        let cache = FileCache::from_config(&config).unwrap();
        assert_eq!(cache.dir(), Path::new("/tmp/moodleorg-test"));
        assert!(cache.is_read_only());
    }
}
