use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::{
    cache::{DiskCache, ObjectReader},
    domain::{
        errors::{CacheError, StorageError},
        models::RemoteObject,
        value_objects::{BucketName, ObjectKey},
    },
    ports::storage::ObjectStore,
};

/// Errors surfaced by RemoteStore operations
#[derive(ThisError, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for RemoteStore operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Proxy for files stored in a remote bucket
///
/// Listing goes to the remote store; payload reads go through a local
/// file cache that is populated on first access.
pub struct RemoteStore {
    bucket: BucketName,
    store: Arc<dyn ObjectStore>,
    cache: DiskCache,
}

impl RemoteStore {
    pub fn new(bucket: BucketName, store: Arc<dyn ObjectStore>, cache: DiskCache) -> Self {
        Self {
            bucket,
            store,
            cache,
        }
    }

    /// Create a store caching under `<cache_root>/<bucket>`
    pub fn with_cache_root(
        bucket: BucketName,
        store: Arc<dyn ObjectStore>,
        cache_root: impl AsRef<Path>,
    ) -> Self {
        let cache = DiskCache::new(cache_root, &bucket);
        Self::new(bucket, store, cache)
    }

    pub fn bucket(&self) -> &BucketName {
        &self.bucket
    }

    /// The local cache directory for this bucket
    pub fn cache_dir(&self) -> &Path {
        self.cache.root()
    }

    /// List store content matching a prefix
    pub async fn ls(&self, prefix: &str) -> StoreResult<Vec<RemoteFile<'_>>> {
        let objects = self.store.list(prefix).await?;
        debug!(bucket = %self.bucket, prefix, count = objects.len(), "ls");
        Ok(objects
            .into_iter()
            .map(|object| RemoteFile {
                store: self,
                object,
            })
            .collect())
    }

    /// List store content for several prefixes
    ///
    /// The order of the returned listings corresponds to the order of the
    /// given prefixes.
    pub async fn ls_many(&self, prefixes: &[&str]) -> StoreResult<Vec<Vec<RemoteFile<'_>>>> {
        try_join_all(prefixes.iter().map(|prefix| self.ls(prefix))).await
    }

    /// Open an object for reading, decoding the gzip payload transparently.
    /// The object is downloaded into the cache on first access.
    pub async fn open(&self, key: &ObjectKey) -> StoreResult<ObjectReader> {
        let path = self.fetch(key).await?;
        Ok(ObjectReader::gzip(path)?)
    }

    /// Open an object for reading without decoding
    pub async fn open_raw(&self, key: &ObjectKey) -> StoreResult<ObjectReader> {
        let path = self.fetch(key).await?;
        Ok(ObjectReader::raw(path)?)
    }

    /// Ensure an object is cached locally and return its cache path
    pub async fn fetch(&self, key: &ObjectKey) -> StoreResult<PathBuf> {
        if self.cache.contains(key) {
            debug!(bucket = %self.bucket, key = %key, "cache hit");
            return Ok(self.cache.entry_path(key));
        }

        info!(bucket = %self.bucket, key = %key, "downloading object into cache");
        let bytes = self.store.get(key).await?;
        let path = self.cache.store(key, &bytes).await?;
        Ok(path)
    }

    /// Whether there is a local copy of the object in the cache
    pub fn is_cached(&self, key: &ObjectKey) -> bool {
        self.cache.contains(key)
    }

    /// The local cache path an object would occupy
    pub fn cache_path(&self, key: &ObjectKey) -> PathBuf {
        self.cache.entry_path(key)
    }

    /// Remove the locally cached copy of one object
    pub async fn clear_cached(&self, key: &ObjectKey) -> StoreResult<()> {
        Ok(self.cache.remove(key).await?)
    }

    /// Remove every cached object for this bucket
    pub async fn purge_cache(&self) -> StoreResult<()> {
        Ok(self.cache.purge().await?)
    }
}

impl std::fmt::Debug for RemoteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStore")
            .field("bucket", &self.bucket)
            .field("cache_dir", &self.cache.root())
            .finish()
    }
}

/// One remote object bound to its store
///
/// Yielded by `ls`; opening it reads through the store's cache.
pub struct RemoteFile<'a> {
    store: &'a RemoteStore,
    object: RemoteObject,
}

impl RemoteFile<'_> {
    pub fn key(&self) -> &ObjectKey {
        &self.object.key
    }

    /// Size of the stored (compressed) payload in bytes
    pub fn size(&self) -> u64 {
        self.object.size
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.object.last_modified
    }

    pub fn etag(&self) -> Option<&str> {
        self.object.etag.as_deref()
    }

    /// The listing record this handle wraps
    pub fn as_object(&self) -> &RemoteObject {
        &self.object
    }

    /// Whether there is a local copy of the file in the cache
    pub fn is_cached(&self) -> bool {
        self.store.is_cached(&self.object.key)
    }

    /// The local cache path for this file
    pub fn cache_path(&self) -> PathBuf {
        self.store.cache_path(&self.object.key)
    }

    /// Open the file, decoding the gzip payload transparently
    pub async fn open(&self) -> StoreResult<ObjectReader> {
        self.store.open(&self.object.key).await
    }

    /// Open the file without decoding
    pub async fn open_raw(&self) -> StoreResult<ObjectReader> {
        self.store.open_raw(&self.object.key).await
    }

    /// Remove the locally cached copy
    pub async fn clear_cached(&self) -> StoreResult<()> {
        self.store.clear_cached(&self.object.key).await
    }

    /// Check the cached copy against the listing etag, when the etag is a
    /// verifiable content MD5. Unverifiable etags are skipped.
    pub async fn verify_cached(&self) -> StoreResult<()> {
        if !self.object.has_verifiable_etag() {
            warn!(key = %self.object.key, "etag not verifiable, skipping cache check");
            return Ok(());
        }
        let expected = self.object.etag_hex().unwrap_or_default();
        Ok(self.store.cache.validate(&self.object.key, expected).await?)
    }
}

impl std::fmt::Debug for RemoteFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<RemoteFile({})>", self.object.key)
    }
}

impl std::fmt::Display for RemoteFile<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.object.key)
    }
}
