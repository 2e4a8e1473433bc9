//! Error types for store operations

use std::path::PathBuf;

use pitwall_schemas::SchemaError;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a collection file
    #[error("Failed to read file {path}: {source}")]
    ReadFailed {
        /// Path to the file
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Failed to write a collection file
    #[error("Failed to write file {path}: {source}")]
    WriteFailed {
        /// Path to the file
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// Failed to create the data directory
    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreationFailed {
        /// Path to the directory
        path: PathBuf,
        /// Source error
        source: std::io::Error,
    },

    /// File content is not a valid collection document
    #[error("Failed to decode {path}: {source}")]
    DecodeFailed {
        /// Path to the file
        path: PathBuf,
        /// Source error
        source: serde_json::Error,
    },

    /// Collection could not be serialized
    #[error("Failed to encode {collection}: {source}")]
    EncodeFailed {
        /// Collection name
        collection: &'static str,
        /// Source error
        source: serde_json::Error,
    },

    /// No record with the requested ID
    #[error("No {kind} found matching ID {id}")]
    NotFound {
        /// Record kind
        kind: &'static str,
        /// Requested ID
        id: u64,
    },

    /// An ID counter cannot advance any further
    #[error("ID allocation failed: {0}")]
    Allocation(#[from] SchemaError),
}

impl StoreError {
    /// Check if this error means the requested record does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a storage I/O failure (unreadable, unwritable or undecodable)
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::ReadFailed { .. }
                | Self::WriteFailed { .. }
                | Self::DirectoryCreationFailed { .. }
                | Self::DecodeFailed { .. }
                | Self::EncodeFailed { .. }
        )
    }

    /// Check if this error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::ReadFailed { .. } => true,
            Self::WriteFailed { .. } => true,
            Self::DirectoryCreationFailed { .. } => false,
            Self::DecodeFailed { .. } => false,
            Self::EncodeFailed { .. } => false,
            Self::Allocation(_) => false,
        }
    }

    /// Create a read error
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a write error
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a decode error
    pub fn decode_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::DecodeFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a not found error
    pub fn not_found(kind: &'static str, id: u64) -> Self {
        Self::NotFound { kind, id }
    }
}
