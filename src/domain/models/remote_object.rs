use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::ObjectKey;

/// One object in the remote bucket, as reported by a listing or head call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteObject {
    pub key: ObjectKey,
    /// Size of the stored (compressed) payload in bytes
    pub size: u64,
    pub last_modified: DateTime<Utc>,
    pub etag: Option<String>,
}

impl RemoteObject {
    /// Whether the etag is a plain content MD5 (single-part uploads only;
    /// multipart etags carry a `-<parts>` suffix and cannot be verified)
    pub fn has_verifiable_etag(&self) -> bool {
        self.etag
            .as_deref()
            .map(|etag| {
                let trimmed = etag.trim_matches('"');
                trimmed.len() == 32 && trimmed.chars().all(|c| c.is_ascii_hexdigit())
            })
            .unwrap_or(false)
    }

    /// The etag with surrounding quotes stripped, if present
    pub fn etag_hex(&self) -> Option<&str> {
        self.etag.as_deref().map(|etag| etag.trim_matches('"'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object_with_etag(etag: Option<&str>) -> RemoteObject {
        RemoteObject {
            key: ObjectKey::new("data/file.gz".to_string()).unwrap(),
            size: 128,
            last_modified: Utc::now(),
            etag: etag.map(str::to_string),
        }
    }

    #[test]
    fn test_verifiable_etag() {
        let md5_etag = "\"9e107d9d372bb6826bd81d3542a419d6\"";
        assert!(object_with_etag(Some(md5_etag)).has_verifiable_etag());
        assert_eq!(
            object_with_etag(Some(md5_etag)).etag_hex(),
            Some("9e107d9d372bb6826bd81d3542a419d6")
        );
    }

    #[test]
    fn test_unverifiable_etags() {
        // Multipart etag
        assert!(!object_with_etag(Some("\"9e107d9d372bb6826bd81d3542a419d6-4\"")).has_verifiable_etag());
        // Missing etag
        assert!(!object_with_etag(None).has_verifiable_etag());
    }
}
