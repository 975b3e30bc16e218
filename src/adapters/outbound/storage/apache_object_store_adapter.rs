use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::{path::Path as ObjectPath, ObjectMeta, ObjectStore as ApacheObjectStore};
use std::sync::Arc;
use tracing::debug;

use crate::{
    domain::{
        errors::{StorageError, StorageResult},
        models::RemoteObject,
        value_objects::ObjectKey,
    },
    ports::storage::ObjectStore,
};

/// Adapter that implements our ObjectStore trait using Apache object_store
pub struct ApacheObjectStoreAdapter {
    inner: Arc<dyn ApacheObjectStore>,
}

impl ApacheObjectStoreAdapter {
    pub fn new(store: Arc<dyn ApacheObjectStore>) -> Self {
        Self { inner: store }
    }

    fn to_remote_object(meta: ObjectMeta) -> StorageResult<RemoteObject> {
        let key = ObjectKey::new(meta.location.to_string()).map_err(|e| {
            StorageError::ValidationError {
                message: format!("Invalid object key from store: {}", e),
            }
        })?;

        Ok(RemoteObject {
            key,
            size: meta.size,
            last_modified: meta.last_modified,
            etag: meta.e_tag,
        })
    }
}

#[async_trait]
impl ObjectStore for ApacheObjectStoreAdapter {
    async fn list(&self, prefix: &str) -> StorageResult<Vec<RemoteObject>> {
        // The backend evaluates prefixes per path segment, but callers use
        // raw string prefixes ("runs/2024-" should match "runs/2024-01/x").
        // List the parent segment, then filter on the string prefix.
        let segment_prefix = match prefix.rsplit_once('/') {
            Some((dir, _)) if !dir.is_empty() => Some(ObjectPath::from(dir)),
            _ => None,
        };

        let mut stream = self.inner.list(segment_prefix.as_ref());
        let mut objects = Vec::new();

        while let Some(result) = stream.next().await {
            let meta = result.map_err(|e| StorageError::InfrastructureError {
                message: format!("Failed to list objects: {}", e),
                source: Some(e.to_string()),
            })?;

            if !meta.location.as_ref().starts_with(prefix) {
                continue;
            }

            objects.push(Self::to_remote_object(meta)?);
        }

        debug!(prefix, count = objects.len(), "listed remote objects");
        Ok(objects)
    }

    async fn get(&self, key: &ObjectKey) -> StorageResult<Bytes> {
        let path = ObjectPath::from(key.as_str());

        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                StorageError::ObjectNotFound { key: key.clone() }
            }
            _ => StorageError::InfrastructureError {
                message: format!("Failed to get object: {}", e),
                source: Some(e.to_string()),
            },
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::InfrastructureError {
                message: format!("Failed to read object bytes: {}", e),
                source: Some(e.to_string()),
            })?;

        Ok(bytes)
    }

    async fn head(&self, key: &ObjectKey) -> StorageResult<RemoteObject> {
        let path = ObjectPath::from(key.as_str());

        let meta = self.inner.head(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => {
                StorageError::ObjectNotFound { key: key.clone() }
            }
            _ => StorageError::InfrastructureError {
                message: format!("Failed to get object metadata: {}", e),
                source: Some(e.to_string()),
            },
        })?;

        Self::to_remote_object(meta)
    }

    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool> {
        let path = ObjectPath::from(key.as_str());

        match self.inner.head(&path).await {
            Ok(_) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::InfrastructureError {
                message: format!("Failed to check object existence: {}", e),
                source: Some(e.to_string()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::{memory::InMemory, PutPayload};

    async fn seeded_adapter(keys: &[&str]) -> ApacheObjectStoreAdapter {
        let store = Arc::new(InMemory::new());
        for key in keys {
            store
                .put(&ObjectPath::from(*key), PutPayload::from_static(b"data"))
                .await
                .unwrap();
        }
        ApacheObjectStoreAdapter::new(store)
    }

    #[tokio::test]
    async fn test_get_and_head() {
        let adapter = seeded_adapter(&["a/b.gz"]).await;
        let key = ObjectKey::new("a/b.gz".to_string()).unwrap();

        let bytes = adapter.get(&key).await.unwrap();
        assert_eq!(bytes.as_ref(), b"data");

        let meta = adapter.head(&key).await.unwrap();
        assert_eq!(meta.key, key);
        assert_eq!(meta.size, 4);
    }

    #[tokio::test]
    async fn test_missing_object_is_not_found() {
        let adapter = seeded_adapter(&[]).await;
        let key = ObjectKey::new("missing.gz".to_string()).unwrap();

        assert!(!adapter.exists(&key).await.unwrap());
        match adapter.get(&key).await {
            Err(StorageError::ObjectNotFound { key: k }) => assert_eq!(k, key),
            other => panic!("expected ObjectNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_uses_string_prefixes() {
        let adapter = seeded_adapter(&[
            "runs/2024-01/a.gz",
            "runs/2024-02/b.gz",
            "runs/2023-12/c.gz",
            "other/d.gz",
        ])
        .await;

        let all = adapter.list("").await.unwrap();
        assert_eq!(all.len(), 4);

        // A prefix that is not a whole path segment still matches
        let winter = adapter.list("runs/2024-").await.unwrap();
        let mut keys: Vec<&str> = winter.iter().map(|o| o.key.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["runs/2024-01/a.gz", "runs/2024-02/b.gz"]);
    }
}
