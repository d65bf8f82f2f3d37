//! Error kinds surfaced by filesystem operations

use fs_tree::{CapabilityParseError, PathError, TreeError};
use thiserror::Error;

/// Errors that can occur during filesystem operations
#[derive(Debug, Error)]
pub enum FsError {
    /// Resolution failed at some segment
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// A create-style operation targets a name already present
    #[error("Path already exists: {0}")]
    PathAlreadyExists(String),

    /// Missing capability, unknown acting user, or a structural rule forbids it
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Structurally nonsensical request
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// A user with this name is already registered
    #[error("User already exists: {0}")]
    UserAlreadyExists(String),

    /// No user with this name is registered
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal tree invariant violated
    #[error("Internal error: {0}")]
    Internal(#[from] TreeError),
}

/// Copyable discriminant of [`FsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    PathNotFound,
    PathAlreadyExists,
    PermissionDenied,
    InvalidOperation,
    UserAlreadyExists,
    UserNotFound,
    Config,
    Internal,
}

impl FsError {
    /// Returns the error kind
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::PathNotFound(_) => ErrorKind::PathNotFound,
            FsError::PathAlreadyExists(_) => ErrorKind::PathAlreadyExists,
            FsError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            FsError::InvalidOperation(_) => ErrorKind::InvalidOperation,
            FsError::UserAlreadyExists(_) => ErrorKind::UserAlreadyExists,
            FsError::UserNotFound(_) => ErrorKind::UserNotFound,
            FsError::Config(_) => ErrorKind::Config,
            FsError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<PathError> for FsError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::NotFound(path) => FsError::PathNotFound(path),
        }
    }
}

impl From<CapabilityParseError> for FsError {
    fn from(err: CapabilityParseError) -> Self {
        FsError::InvalidOperation(err.to_string())
    }
}

/// Result alias for filesystem operations
pub type FsResult<T> = Result<T, FsError>;
