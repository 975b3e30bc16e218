use object_store::memory::InMemory;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    adapters::outbound::{
        credentials::{StaticCredentialsProvider, StsAssumeRoleProvider},
        storage::{create_s3_store, ApacheObjectStoreAdapter, S3Config},
    },
    domain::{
        errors::{CredentialError, ValidationError},
        value_objects::{BucketName, RoleArn},
    },
    ports::credentials::{CredentialsProvider, SessionCredentials},
    services::RemoteStore,
};

/// Configuration for a RemoteStore
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub bucket: String,
    pub backend: StorageBackend,
    pub credentials: CredentialSource,
    pub cache_dir: Option<PathBuf>,
}

/// Storage backend configuration
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    S3 {
        region: String,
        endpoint: Option<String>,
        allow_http: bool,
    },
}

/// Where storage credentials come from
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Ambient credential chain (environment, shared config, instance profile)
    Default,
    Static {
        access_key: String,
        secret_key: String,
    },
    AssumeRole {
        role: RoleArn,
        session_name: Option<String>,
    },
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid configuration value: {0}")]
    Validation(#[from] ValidationError),

    #[error("Credential acquisition failed: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Storage initialization error: {message}")]
    StorageInit { message: String },
}

/// Builder wiring configuration into a RemoteStore
pub struct StoreBuilder {
    config: StoreConfig,
}

impl StoreBuilder {
    /// Create a builder for a bucket, defaulting to the in-memory backend
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            config: StoreConfig {
                bucket: bucket.into(),
                backend: StorageBackend::InMemory,
                credentials: CredentialSource::Default,
                cache_dir: None,
            },
        }
    }

    /// Configure from `REMOTE_STORE_*` environment variables
    pub fn from_env() -> Result<Self, AppError> {
        let bucket = std::env::var("REMOTE_STORE_BUCKET").map_err(|_| AppError::Configuration {
            message: "REMOTE_STORE_BUCKET environment variable required".to_string(),
        })?;

        let backend = match std::env::var("REMOTE_STORE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::InMemory,
            _ => StorageBackend::S3 {
                region: std::env::var("REMOTE_STORE_REGION")
                    .unwrap_or_else(|_| "us-east-1".to_string()),
                endpoint: std::env::var("REMOTE_STORE_ENDPOINT").ok(),
                allow_http: std::env::var("REMOTE_STORE_ALLOW_HTTP")
                    .map(|v| v.to_lowercase() == "true")
                    .unwrap_or(false),
            },
        };

        let credentials = match (
            std::env::var("REMOTE_STORE_ROLE_ARN").ok(),
            std::env::var("REMOTE_STORE_ACCESS_KEY").ok(),
            std::env::var("REMOTE_STORE_SECRET_KEY").ok(),
        ) {
            (Some(role), _, _) => CredentialSource::AssumeRole {
                role: RoleArn::new(role)?,
                session_name: std::env::var("REMOTE_STORE_SESSION_NAME").ok(),
            },
            (None, Some(access_key), Some(secret_key)) => CredentialSource::Static {
                access_key,
                secret_key,
            },
            _ => CredentialSource::Default,
        };

        let cache_dir = std::env::var("REMOTE_STORE_CACHE_DIR").ok().map(PathBuf::from);

        Ok(Self {
            config: StoreConfig {
                bucket,
                backend,
                credentials,
                cache_dir,
            },
        })
    }

    /// Configure the builder with custom settings
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Configure the storage backend
    pub fn with_backend(mut self, backend: StorageBackend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Configure the credential source
    pub fn with_credentials(mut self, credentials: CredentialSource) -> Self {
        self.config.credentials = credentials;
        self
    }

    /// Configure the local cache root (entries land under `<dir>/<bucket>`)
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.cache_dir = Some(dir.into());
        self
    }

    /// Build the RemoteStore
    pub async fn build(self) -> Result<RemoteStore, AppError> {
        let bucket = BucketName::new(self.config.bucket.clone())?;
        let cache_root = self
            .config
            .cache_dir
            .clone()
            .unwrap_or_else(default_cache_root);

        let backend = match &self.config.backend {
            StorageBackend::InMemory => {
                Arc::new(InMemory::new()) as Arc<dyn object_store::ObjectStore>
            }
            StorageBackend::S3 {
                region,
                endpoint,
                allow_http,
            } => {
                let mut s3_config = S3Config::new(bucket.as_str(), region.as_str());
                s3_config.endpoint = endpoint.clone();
                s3_config.allow_http = *allow_http;

                if let Some(creds) = self.resolve_credentials().await? {
                    s3_config = s3_config.with_credentials(&creds);
                }

                create_s3_store(s3_config).map_err(|e| AppError::StorageInit {
                    message: e.to_string(),
                })?
            }
        };

        let adapter = Arc::new(ApacheObjectStoreAdapter::new(backend));
        Ok(RemoteStore::with_cache_root(bucket, adapter, cache_root))
    }

    async fn resolve_credentials(&self) -> Result<Option<SessionCredentials>, AppError> {
        match &self.config.credentials {
            CredentialSource::Default => Ok(None),
            CredentialSource::Static {
                access_key,
                secret_key,
            } => {
                let provider = StaticCredentialsProvider::from_keys(access_key, secret_key);
                Ok(Some(provider.credentials().await?))
            }
            CredentialSource::AssumeRole { role, session_name } => {
                let provider = match session_name {
                    Some(name) => StsAssumeRoleProvider::new(role.clone(), name),
                    None => StsAssumeRoleProvider::with_generated_session(role.clone()),
                };
                Ok(Some(provider.credentials().await?))
            }
        }
    }
}

/// Default cache root when none is configured
pub fn default_cache_root() -> PathBuf {
    std::env::temp_dir().join("remote-store")
}

/// Create an in-memory store for testing and development
pub async fn create_in_memory_store(
    bucket: impl Into<String>,
    cache_dir: impl Into<PathBuf>,
) -> Result<RemoteStore, AppError> {
    StoreBuilder::new(bucket)
        .with_backend(StorageBackend::InMemory)
        .with_cache_dir(cache_dir)
        .build()
        .await
}

/// Create an S3-backed store
pub async fn create_s3_store_for(
    bucket: impl Into<String>,
    region: impl Into<String>,
    credentials: CredentialSource,
    cache_dir: Option<PathBuf>,
) -> Result<RemoteStore, AppError> {
    let mut builder = StoreBuilder::new(bucket)
        .with_backend(StorageBackend::S3 {
            region: region.into(),
            endpoint: None,
            allow_http: false,
        })
        .with_credentials(credentials);

    if let Some(dir) = cache_dir {
        builder = builder.with_cache_dir(dir);
    }

    builder.build().await
}
