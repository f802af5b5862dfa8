//! Error types for localfs-cache
//!
//! Every failure of the store surfaces as a single `CacheError`. Filesystem
//! variants carry the offending path and the underlying OS error.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using CacheError
pub type Result<T> = std::result::Result<T, CacheError>;

/// Unified error type for cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    // -------------------------------------------------------------------------
    // Filesystem Errors
    // -------------------------------------------------------------------------
    #[error("Could not create bank directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write cache file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read cache file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not read modification time of {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not list bank directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Content Errors
    // -------------------------------------------------------------------------
    #[error("Key {key:?} not present in compound cache file {}", .path.display())]
    MissingKey { path: PathBuf, key: String },

    #[error("Cache file {} is corrupt: {reason}", .path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Addressing Errors
    // -------------------------------------------------------------------------
    #[error("Invalid cache address: {0}")]
    InvalidAddress(String),
}

impl CacheError {
    /// The filesystem path this error refers to, if any
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            CacheError::CreateDir { path, .. }
            | CacheError::Write { path, .. }
            | CacheError::Read { path, .. }
            | CacheError::Metadata { path, .. }
            | CacheError::ListDir { path, .. }
            | CacheError::Remove { path, .. }
            | CacheError::MissingKey { path, .. }
            | CacheError::Corrupt { path, .. } => Some(path),
            CacheError::Serialization(_) | CacheError::InvalidAddress(_) => None,
        }
    }
}
