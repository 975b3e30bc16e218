use crate::domain::errors::ValidationError;

/// A validated object key (path) in the remote bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Create a new ObjectKey with validation
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::EmptyObjectKey);
        }

        if value.len() > 1024 {
            return Err(ValidationError::ObjectKeyTooLong {
                actual: value.len(),
                max: 1024,
            });
        }

        // Null bytes would corrupt cache paths
        if value.contains('\0') {
            return Err(ValidationError::InvalidObjectKeyCharacter('\0'));
        }

        if value.starts_with('/') {
            return Err(ValidationError::ObjectKeyStartsWithSlash);
        }

        if value.contains("//") {
            return Err(ValidationError::ObjectKeyContainsDoubleSlash);
        }

        Ok(Self(value))
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the directory part of the key (everything before the last '/')
    pub fn parent(&self) -> Option<&str> {
        self.0.rfind('/').map(|idx| &self.0[..idx])
    }

    /// Get the file name part of the key (everything after the last '/')
    pub fn file_name(&self) -> &str {
        self.0.rfind('/').map_or(&self.0, |idx| &self.0[idx + 1..])
    }

    /// Check if this key has the given prefix
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }

    /// Join this key with a suffix
    pub fn join(&self, suffix: &str) -> Result<ObjectKey, ValidationError> {
        let mut joined = self.0.clone();
        if !joined.ends_with('/') && !suffix.starts_with('/') {
            joined.push('/');
        }
        joined.push_str(suffix);
        ObjectKey::new(joined)
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for ObjectKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_key() {
        assert!(ObjectKey::new("file.txt.gz".to_string()).is_ok());
        assert!(ObjectKey::new("folder/file.txt.gz".to_string()).is_ok());
        assert!(ObjectKey::new("deep/folder/structure/file.json.gz".to_string()).is_ok());
    }

    #[test]
    fn test_invalid_object_key() {
        assert!(ObjectKey::new("".to_string()).is_err());
        assert!(ObjectKey::new("/leading-slash".to_string()).is_err());
        assert!(ObjectKey::new("double//slash".to_string()).is_err());
        assert!(ObjectKey::new("null\0byte".to_string()).is_err());
        assert!(ObjectKey::new("x".repeat(1025)).is_err());
    }

    #[test]
    fn test_object_key_parts() {
        let key = ObjectKey::new("folder/subfolder/file.txt".to_string()).unwrap();
        assert_eq!(key.parent(), Some("folder/subfolder"));
        assert_eq!(key.file_name(), "file.txt");
        assert!(key.has_prefix("folder/"));

        let root_key = ObjectKey::new("file.txt".to_string()).unwrap();
        assert_eq!(root_key.parent(), None);
        assert_eq!(root_key.file_name(), "file.txt");
    }

    #[test]
    fn test_object_key_join() {
        let key = ObjectKey::new("runs/2024".to_string()).unwrap();
        let joined = key.join("output.log.gz").unwrap();
        assert_eq!(joined.as_str(), "runs/2024/output.log.gz");
    }
}
