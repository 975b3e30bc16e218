use async_trait::async_trait;

use crate::{
    domain::errors::CredentialResult,
    ports::credentials::{CredentialsProvider, SessionCredentials},
};

/// Provider that hands out a fixed set of credentials
pub struct StaticCredentialsProvider {
    credentials: SessionCredentials,
}

impl StaticCredentialsProvider {
    pub fn new(credentials: SessionCredentials) -> Self {
        Self { credentials }
    }

    pub fn from_keys(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self::new(SessionCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            expiration: None,
        })
    }
}

#[async_trait]
impl CredentialsProvider for StaticCredentialsProvider {
    async fn credentials(&self) -> CredentialResult<SessionCredentials> {
        Ok(self.credentials.clone())
    }
}
