use thiserror::Error as ThisError;

/// Errors from credential acquisition
#[derive(ThisError, Debug)]
pub enum CredentialError {
    #[error("Assume role failed for {role}: {message}")]
    AssumeRoleFailed { role: String, message: String },

    #[error("STS returned no credentials for {role}")]
    MissingCredentials { role: String },

    #[error("Credentials expired at {expired_at}")]
    Expired { expired_at: chrono::DateTime<chrono::Utc> },

    #[error("Credential configuration error: {message}")]
    Configuration { message: String },
}

/// Result type for credential operations
pub type CredentialResult<T> = Result<T, CredentialError>;
