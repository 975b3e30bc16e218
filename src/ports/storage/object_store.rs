use crate::domain::{
    errors::StorageResult, models::RemoteObject, value_objects::ObjectKey,
};
use async_trait::async_trait;
use bytes::Bytes;

/// Port for read access to a remote bucket
/// This abstracts the actual storage backend (S3, MinIO, in-memory, ...)
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// List every object under a prefix. Listing pagination is handled by
    /// the adapter; callers always see the complete result.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<RemoteObject>>;

    /// Retrieve the full object payload
    async fn get(&self, key: &ObjectKey) -> StorageResult<Bytes>;

    /// Retrieve object metadata without the payload
    async fn head(&self, key: &ObjectKey) -> StorageResult<RemoteObject>;

    /// Check if an object exists. Not-found is `false`, transport
    /// failures are errors.
    async fn exists(&self, key: &ObjectKey) -> StorageResult<bool>;
}
