//! Error types for the sld-app service layer.

use std::path::PathBuf;

/// Application error type that wraps errors from the backend crates and
/// gives CLI and other frontends one error interface.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read {what} document {path}: {message}")]
    DocumentRead {
        what: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write {what} document {path}: {message}")]
    DocumentWrite {
        what: &'static str,
        path: PathBuf,
        message: String,
    },

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("Topology compilation failed: {0}")]
    Compile(String),

    #[error("No valid topology loaded")]
    NotReady,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sld-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<sld_topology::TopologyError> for AppError {
    fn from(err: sld_topology::TopologyError) -> Self {
        AppError::Topology(err.to_string())
    }
}

impl From<sld_core::SldError> for AppError {
    fn from(err: sld_core::SldError) -> Self {
        AppError::Compile(err.to_string())
    }
}
