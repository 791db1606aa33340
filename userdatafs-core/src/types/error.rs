//! Error types for file system providers.

use thiserror::Error;
use crate::types::{Capability, ResourceUri};

/// Errors raised by file system providers.
///
/// Wrapping providers create only [`FileSystemError::Unsupported`]; every
/// other variant comes from the provider that performed the operation and is
/// passed through as-is.
#[derive(Debug, Error)]
pub enum FileSystemError {
    /// File or directory not found.
    #[error("Path not found: {resource}")]
    NotFound {
        resource: ResourceUri
    },

    /// File or directory already exists.
    #[error("Path already exists: {resource}")]
    FileExists {
        resource: ResourceUri
    },

    /// Expected a directory but found something else.
    #[error("Not a directory: {resource}")]
    NotADirectory {
        resource: ResourceUri
    },

    /// Expected a file but found a directory.
    #[error("Is a directory: {resource}")]
    IsADirectory {
        resource: ResourceUri
    },

    /// Permission denied for the operation.
    #[error("Permission denied for operation '{operation}' on path: {resource}")]
    PermissionDenied {
        resource: ResourceUri,
        operation: String,
    },

    /// The provider cannot currently serve the request.
    #[error("Provider unavailable: {message}")]
    Unavailable {
        message: String
    },

    /// The operation was cancelled by the caller.
    #[error("Operation cancelled")]
    Cancelled,

    /// I/O error from the underlying system.
    #[error("I/O error")]
    Io {
        #[from]
        #[source]
        source: std::io::Error,
    },

    /// Provider-specific failure.
    #[error("{0}")]
    Other(String),

    /// The provider does not implement the capability the operation needs.
    #[error("Operation not supported: {operation} requires {capability} capability")]
    Unsupported {
        operation: &'static str,
        capability: Capability,
    },
}

impl FileSystemError {
    /// Returns a stable short code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            FileSystemError::NotFound { .. } => "not_found",
            FileSystemError::FileExists { .. } => "file_exists",
            FileSystemError::NotADirectory { .. } => "not_a_directory",
            FileSystemError::IsADirectory { .. } => "is_a_directory",
            FileSystemError::PermissionDenied { .. } => "permission_denied",
            FileSystemError::Unavailable { .. } => "unavailable",
            FileSystemError::Cancelled => "cancelled",
            FileSystemError::Io { .. } => "io",
            FileSystemError::Other(_) => "other",
            FileSystemError::Unsupported { .. } => "unsupported",
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FileSystemError::Unsupported { .. })
    }

    pub(crate) fn unsupported(operation: &'static str, capability: Capability) -> Self {
        FileSystemError::Unsupported { operation, capability }
    }
}

/// Result type alias for provider operations.
pub type OperationResult<T> = Result<T, FileSystemError>;
