//! Cache Error Types
//!
//! Structured error handling for cache and metadata operations.
//! Every failure in the core propagates as one of these variants; nothing is
//! swallowed or retried internally.

use std::path::PathBuf;

/// Errors raised by cache and metadata operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to create cache file at {path}: {source}")]
    CacheCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt metadata sidecar at {path}: {source}")]
    CorruptMetadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize metadata: {0}")]
    Serialization(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CacheError>;
