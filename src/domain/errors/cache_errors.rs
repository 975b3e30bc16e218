use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Errors from the local object cache
#[derive(ThisError, Debug)]
pub enum CacheError {
    #[error("IO error on cache entry {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cache entry {} failed integrity check (expected etag {expected})", path.display())]
    IntegrityMismatch { path: PathBuf, expected: String },

    #[error("Cache entry not found: {}", path.display())]
    EntryNotFound { path: PathBuf },
}

impl CacheError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for cache operations
pub type CacheResult<T> = Result<T, CacheError>;
