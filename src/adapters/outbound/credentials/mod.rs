pub mod static_provider;
pub mod sts;

pub use static_provider::StaticCredentialsProvider;
pub use sts::{assume_role, StsAssumeRoleProvider};
