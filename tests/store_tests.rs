use async_trait::async_trait;
use bytes::Bytes;
use flate2::{write::GzEncoder, Compression};
use object_store::{memory::InMemory, path::Path as ObjectPath, ObjectStore as _, PutPayload};
use remote_store::{
    domain::errors::StorageResult, ApacheObjectStoreAdapter, BucketName, ObjectKey, ObjectStore,
    RemoteObject, RemoteStore, StorageError, StoreError,
};
use std::io::{Read, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Storage adapter wrapper that counts remote payload reads
struct CountingStore {
    inner: ApacheObjectStoreAdapter,
    gets: Arc<AtomicUsize>,
}

#[async_trait]
impl ObjectStore for CountingStore {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<RemoteObject>> {
        self.inner.list(prefix).await
    }

    async fn get(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn head(&self, key: &ObjectKey) -> StorageResult<RemoteObject> {
        self.inner.head(key).await
    }

    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        self.inner.exists(key).await
    }
}

fn gzip_bytes(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Build a store over a seeded in-memory backend; payloads are stored
/// gzip-compressed, as they are in the real bucket.
async fn seeded_store(
    cache_root: &std::path::Path,
    entries: &[(&str, &[u8])],
) -> (RemoteStore, Arc<AtomicUsize>) {
    let backend = Arc::new(InMemory::new());
    for (key, payload) in entries {
        backend
            .put(
                &ObjectPath::from(*key),
                PutPayload::from(gzip_bytes(payload)),
            )
            .await
            .unwrap();
    }

    let gets = Arc::new(AtomicUsize::new(0));
    let adapter = CountingStore {
        inner: ApacheObjectStoreAdapter::new(backend),
        gets: gets.clone(),
    };

    let bucket = BucketName::new("test-bucket".to_string()).unwrap();
    let store = RemoteStore::with_cache_root(bucket, Arc::new(adapter), cache_root);
    (store, gets)
}

fn key(s: &str) -> ObjectKey {
    ObjectKey::new(s.to_string()).unwrap()
}

#[tokio::test]
async fn ls_filters_by_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(
        dir.path(),
        &[
            ("runs/2024/a.gz", b"a"),
            ("runs/2024/b.gz", b"b"),
            ("runs/2023/c.gz", b"c"),
        ],
    )
    .await;

    let files = store.ls("runs/2024/").await.unwrap();
    let mut keys: Vec<&str> = files.iter().map(|f| f.key().as_str()).collect();
    keys.sort();
    assert_eq!(keys, vec!["runs/2024/a.gz", "runs/2024/b.gz"]);
}

#[tokio::test]
async fn ls_many_preserves_prefix_order() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(
        dir.path(),
        &[("beta/x.gz", b"x"), ("alpha/y.gz", b"y")],
    )
    .await;

    // Listing order corresponds to prefix order, not lexical order
    let listings = store.ls_many(&["beta/", "alpha/"]).await.unwrap();
    assert_eq!(listings.len(), 2);
    assert_eq!(listings[0][0].key().as_str(), "beta/x.gz");
    assert_eq!(listings[1][0].key().as_str(), "alpha/y.gz");
}

#[tokio::test]
async fn open_decodes_gzip_payload() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(dir.path(), &[("data/greeting.gz", b"hello world")]).await;

    let mut contents = String::new();
    store
        .open(&key("data/greeting.gz"))
        .await
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "hello world");
}

#[tokio::test]
async fn open_raw_returns_compressed_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(dir.path(), &[("data/greeting.gz", b"hello world")]).await;

    let mut raw = Vec::new();
    store
        .open_raw(&key("data/greeting.gz"))
        .await
        .unwrap()
        .read_to_end(&mut raw)
        .unwrap();
    assert_eq!(raw, gzip_bytes(b"hello world"));
}

#[tokio::test]
async fn second_open_is_served_from_cache() {
    let dir = tempfile::tempdir().unwrap();
    let (store, gets) = seeded_store(dir.path(), &[("data/file.gz", b"payload")]).await;
    let key = key("data/file.gz");

    assert!(!store.is_cached(&key));
    store.open(&key).await.unwrap();
    assert!(store.is_cached(&key));
    assert_eq!(gets.load(Ordering::SeqCst), 1);

    // No remote read the second time
    store.open(&key).await.unwrap();
    assert_eq!(gets.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn clear_cached_forces_redownload() {
    let dir = tempfile::tempdir().unwrap();
    let (store, gets) = seeded_store(dir.path(), &[("data/file.gz", b"payload")]).await;
    let key = key("data/file.gz");

    store.open(&key).await.unwrap();
    store.clear_cached(&key).await.unwrap();
    assert!(!store.is_cached(&key));

    store.open(&key).await.unwrap();
    assert_eq!(gets.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn open_missing_object_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(dir.path(), &[]).await;

    match store.open(&key("missing.gz")).await {
        Err(StoreError::Storage(StorageError::ObjectNotFound { key })) => {
            assert_eq!(key.as_str(), "missing.gz");
        }
        other => panic!("expected ObjectNotFound, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn fetch_returns_cache_path_under_bucket() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(dir.path(), &[("data/file.gz", b"payload")]).await;

    let path = store.fetch(&key("data/file.gz")).await.unwrap();
    assert_eq!(path, dir.path().join("test-bucket").join("data/file.gz"));
    assert!(path.is_file());
}

#[tokio::test]
async fn purge_cache_removes_everything_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(
        dir.path(),
        &[("a/one.gz", b"1"), ("b/two.gz", b"2")],
    )
    .await;

    store.fetch(&key("a/one.gz")).await.unwrap();
    store.fetch(&key("b/two.gz")).await.unwrap();

    store.purge_cache().await.unwrap();
    assert!(!store.cache_dir().exists());
    assert!(!store.is_cached(&key("a/one.gz")));

    // Purging an already-empty cache is fine
    store.purge_cache().await.unwrap();
}

#[tokio::test]
async fn remote_file_handles_expose_metadata_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let (store, _) = seeded_store(dir.path(), &[("data/file.gz", b"contents")]).await;

    let files = store.ls("data/").await.unwrap();
    assert_eq!(files.len(), 1);
    let file = &files[0];

    assert_eq!(file.key().as_str(), "data/file.gz");
    assert_eq!(file.size(), gzip_bytes(b"contents").len() as u64);
    assert!(!file.is_cached());

    let mut contents = String::new();
    file.open()
        .await
        .unwrap()
        .read_to_string(&mut contents)
        .unwrap();
    assert_eq!(contents, "contents");
    assert!(file.is_cached());

    file.clear_cached().await.unwrap();
    assert!(!file.is_cached());
}
