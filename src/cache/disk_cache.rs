use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{
    errors::{CacheError, CacheResult},
    value_objects::{BucketName, ObjectKey},
};

/// Local file cache for one bucket
///
/// Entries live at `<root>/<bucket>/<key>` and hold the remote payload
/// verbatim (still compressed). Decoding happens at open time.
pub struct DiskCache {
    root: PathBuf,
}

impl DiskCache {
    /// Create a cache rooted at `<cache_root>/<bucket>`
    pub fn new(cache_root: impl AsRef<Path>, bucket: &BucketName) -> Self {
        Self {
            root: cache_root.as_ref().join(bucket.as_str()),
        }
    }

    /// The cache directory for this bucket
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Deterministic local path for a key
    pub fn entry_path(&self, key: &ObjectKey) -> PathBuf {
        self.root.join(key.as_str())
    }

    /// Whether a locally cached copy of the key exists
    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.entry_path(key).is_file()
    }

    /// Write an entry. The bytes land in a temporary sibling first and are
    /// renamed into place, so an entry is never observable half-written.
    pub async fn store(&self, key: &ObjectKey, bytes: &[u8]) -> CacheResult<PathBuf> {
        let path = self.entry_path(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::io(parent, e))?;
        }

        let staging = path.with_file_name(format!("{}.part", key.file_name()));

        tokio::fs::write(&staging, bytes)
            .await
            .map_err(|e| CacheError::io(&staging, e))?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| CacheError::io(&path, e))?;

        debug!(key = %key, path = %path.display(), size = bytes.len(), "stored cache entry");
        Ok(path)
    }

    /// Delete one entry. Removing an absent entry is a no-op.
    pub async fn remove(&self, key: &ObjectKey) -> CacheResult<()> {
        let path = self.entry_path(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(&path, e)),
        }
    }

    /// Remove the whole cache directory for this bucket. Idempotent.
    pub async fn purge(&self) -> CacheResult<()> {
        match tokio::fs::remove_dir_all(&self.root).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CacheError::io(&self.root, e)),
        }
    }

    /// Compare the MD5 of a cached entry against the expected etag hex
    pub async fn validate(&self, key: &ObjectKey, expected_md5_hex: &str) -> CacheResult<()> {
        let path = self.entry_path(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CacheError::EntryNotFound { path });
            }
            Err(e) => return Err(CacheError::io(&path, e)),
        };

        let digest = format!("{:x}", md5::compute(&bytes));
        if digest != expected_md5_hex {
            return Err(CacheError::IntegrityMismatch {
                path,
                expected: expected_md5_hex.to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_in(dir: &tempfile::TempDir) -> DiskCache {
        let bucket = BucketName::new("test-bucket".to_string()).unwrap();
        DiskCache::new(dir.path(), &bucket)
    }

    fn key(s: &str) -> ObjectKey {
        ObjectKey::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_store_creates_nested_entry() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let key = key("deep/nested/file.gz");

        assert!(!cache.contains(&key));
        let path = cache.store(&key, b"payload").await.unwrap();
        assert!(cache.contains(&key));
        assert_eq!(std::fs::read(path).unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let key = key("file.gz");

        cache.store(&key, b"payload").await.unwrap();
        cache.remove(&key).await.unwrap();
        assert!(!cache.contains(&key));

        // Second removal of an absent entry succeeds
        cache.remove(&key).await.unwrap();
    }

    #[tokio::test]
    async fn test_purge_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);

        cache.store(&key("a/b.gz"), b"x").await.unwrap();
        cache.purge().await.unwrap();
        assert!(!cache.root().exists());

        cache.purge().await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_detects_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(&dir);
        let key = key("file.gz");

        cache.store(&key, b"payload").await.unwrap();
        let good = format!("{:x}", md5::compute(b"payload"));
        cache.validate(&key, &good).await.unwrap();

        let bad = format!("{:x}", md5::compute(b"other"));
        assert!(matches!(
            cache.validate(&key, &bad).await,
            Err(CacheError::IntegrityMismatch { .. })
        ));
    }
}
