mod provider;

pub use provider::{CredentialsProvider, SessionCredentials};
