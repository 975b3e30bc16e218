pub mod adapters;
pub mod app;
pub mod cache;
pub mod domain;
pub mod ports;
pub mod services;

// Re-export key types for convenience

// Domain types - core entities and value objects
pub use domain::{
    BucketName,
    CacheError,
    CredentialError,
    DomainValidationError,
    // Models
    ObjectKey,
    RemoteObject,
    RoleArn,
    // Errors
    StorageError,
};

// Port types - interfaces for external systems
pub use ports::{
    // Credential ports
    CredentialsProvider,
    // Storage ports
    ObjectStore,
    SessionCredentials,
};

// Service types - the store itself
pub use services::{RemoteFile, RemoteStore, StoreError, StoreResult};

// Cache types
pub use cache::{DiskCache, ObjectReader};

// Application factory and configuration
pub use app::{
    create_in_memory_store, create_s3_store_for, default_cache_root, AppError, CredentialSource,
    StorageBackend, StoreBuilder, StoreConfig,
};

// Adapter types - infrastructure implementations
pub use adapters::outbound::{
    credentials::{assume_role, StaticCredentialsProvider, StsAssumeRoleProvider},
    storage::{create_s3_store, ApacheObjectStoreAdapter, S3Config},
};

// Public facade for easy construction
pub mod prelude {
    pub use crate::{
        assume_role, create_in_memory_store, create_s3_store_for, BucketName, CredentialSource,
        CredentialsProvider, ObjectKey, ObjectStore, RemoteFile, RemoteStore, RoleArn,
        SessionCredentials, StorageBackend, StoreBuilder,
    };
}
