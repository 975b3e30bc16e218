use crate::domain::errors::ValidationError;

/// A validated IAM role ARN, e.g. `arn:aws:iam::123456789012:role/reader`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoleArn(String);

impl RoleArn {
    /// Create a new RoleArn with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyRoleArn);
        }

        if !value.starts_with("arn:") {
            return Err(ValidationError::RoleArnMissingPrefix);
        }

        // arn:<partition>:<service>:<region>:<account>:<resource>
        let parts: Vec<&str> = value.splitn(6, ':').collect();
        if parts.len() != 6 || parts[1].is_empty() || parts[4].is_empty() {
            return Err(ValidationError::RoleArnMalformed { arn: value });
        }

        if parts[2] != "iam" {
            return Err(ValidationError::RoleArnWrongService {
                service: parts[2].to_string(),
            });
        }

        let resource = parts[5];
        match resource.split_once('/') {
            Some(("role", name)) if !name.is_empty() => {}
            _ => {
                return Err(ValidationError::RoleArnWrongResourceType {
                    resource: resource.to_string(),
                });
            }
        }

        Ok(Self(value))
    }

    /// Get the ARN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The role name (the part after `role/`)
    pub fn role_name(&self) -> &str {
        self.0
            .rsplit_once("role/")
            .map_or("", |(_, name)| name)
    }
}

impl std::fmt::Display for RoleArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
