//! STS assume-role credential acquisition
//!
//! `assume_role` performs a one-shot AssumeRole call. The provider form
//! memoizes the result and re-assumes only when the cached credentials
//! are within 60 seconds of expiring.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    domain::{
        errors::{CredentialError, CredentialResult},
        value_objects::RoleArn,
    },
    ports::credentials::{CredentialsProvider, SessionCredentials},
};

/// Cached credentials are considered stale this close to expiry
const EXPIRY_BUFFER_SECONDS: i64 = 60;

/// Assume a storage role and return its temporary credentials
pub async fn assume_role(role: &RoleArn, session_name: &str) -> CredentialResult<SessionCredentials> {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_sts::Client::new(&config);

    debug!(role = %role, session_name, "assuming role");

    let resp = client
        .assume_role()
        .role_arn(role.as_str())
        .role_session_name(session_name)
        .send()
        .await
        .map_err(|e| CredentialError::AssumeRoleFailed {
            role: role.to_string(),
            message: e.to_string(),
        })?;

    let creds = resp
        .credentials()
        .ok_or_else(|| CredentialError::MissingCredentials {
            role: role.to_string(),
        })?;

    let expiration = to_chrono(creds.expiration());
    info!(role = %role, ?expiration, "assumed role");

    Ok(SessionCredentials {
        access_key_id: creds.access_key_id().to_string(),
        secret_access_key: creds.secret_access_key().to_string(),
        session_token: Some(creds.session_token().to_string()),
        expiration,
    })
}

fn to_chrono(instant: &aws_sdk_sts::primitives::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(instant.secs(), instant.subsec_nanos())
}

/// Provider that assumes a role on demand and memoizes the result
pub struct StsAssumeRoleProvider {
    role: RoleArn,
    session_name: String,
    cached: Mutex<Option<SessionCredentials>>,
}

impl StsAssumeRoleProvider {
    pub fn new(role: RoleArn, session_name: impl Into<String>) -> Self {
        Self {
            role,
            session_name: session_name.into(),
            cached: Mutex::new(None),
        }
    }

    /// Create a provider with a generated session name
    pub fn with_generated_session(role: RoleArn) -> Self {
        let session_name = format!("remote-store-{}", uuid::Uuid::new_v4());
        Self::new(role, session_name)
    }
}

#[async_trait]
impl CredentialsProvider for StsAssumeRoleProvider {
    async fn credentials(&self) -> CredentialResult<SessionCredentials> {
        let mut cached = self.cached.lock().await;

        if let Some(creds) = cached.as_ref() {
            if !creds.is_expired(Duration::seconds(EXPIRY_BUFFER_SECONDS)) {
                debug!(role = %self.role, "using memoized role credentials");
                return Ok(creds.clone());
            }
        }

        let fresh = assume_role(&self.role, &self.session_name).await?;
        *cached = Some(fresh.clone());
        Ok(fresh)
    }
}
