use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::errors::CredentialResult;

/// Temporary credentials for the storage backend
#[derive(Debug, Clone, Serialize)]
pub struct SessionCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub expiration: Option<DateTime<Utc>>,
}

impl SessionCredentials {
    /// Check whether the credentials are expired, treating anything within
    /// `buffer` of the expiration instant as already expired. Credentials
    /// without an expiration never expire.
    pub fn is_expired(&self, buffer: Duration) -> bool {
        match self.expiration {
            Some(expiration) => Utc::now() + buffer >= expiration,
            None => false,
        }
    }
}

/// Port for obtaining storage credentials
/// Implementations may cache internally but must never hand out
/// credentials past their expiration.
#[async_trait]
pub trait CredentialsProvider: Send + Sync + 'static {
    async fn credentials(&self) -> CredentialResult<SessionCredentials>;
}
