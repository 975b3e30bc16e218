//! S3 storage backend construction using the object_store crate
//!
//! Builds the `AmazonS3` backend the storage adapter wraps. Session
//! tokens are supported so assumed-role credentials plug in directly;
//! custom endpoints cover MinIO-style deployments.

use anyhow::{Context, Result};
use object_store::{aws::AmazonS3Builder, ObjectStore as ObjectStoreBackend};
use std::sync::Arc;

use crate::ports::credentials::SessionCredentials;

/// Configuration for the S3 storage backend
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint: Option<String>,
    pub allow_http: bool,
}

impl S3Config {
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            access_key: None,
            secret_key: None,
            session_token: None,
            endpoint: None,
            allow_http: false,
        }
    }

    /// Apply temporary credentials, e.g. from an assumed role
    pub fn with_credentials(mut self, creds: &SessionCredentials) -> Self {
        self.access_key = Some(creds.access_key_id.clone());
        self.secret_key = Some(creds.secret_access_key.clone());
        self.session_token = creds.session_token.clone();
        self
    }
}

/// Create an S3 store from configuration
pub fn create_s3_store(config: S3Config) -> Result<Arc<dyn ObjectStoreBackend>> {
    let mut builder = AmazonS3Builder::from_env()
        .with_bucket_name(&config.bucket)
        .with_region(&config.region);

    if let Some(access_key) = &config.access_key {
        builder = builder.with_access_key_id(access_key);
    }

    if let Some(secret_key) = &config.secret_key {
        builder = builder.with_secret_access_key(secret_key);
    }

    if let Some(token) = &config.session_token {
        builder = builder.with_token(token);
    }

    if let Some(endpoint) = &config.endpoint {
        builder = builder.with_endpoint(endpoint);
    }

    if config.allow_http {
        builder = builder.with_allow_http(true);
    }

    let store = builder.build().context("Failed to build S3 store")?;

    Ok(Arc::new(store))
}
