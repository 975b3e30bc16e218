mod bucket_name;
mod object_key;
mod role_arn;

pub use bucket_name::BucketName;
pub use object_key::ObjectKey;
pub use role_arn::RoleArn;
