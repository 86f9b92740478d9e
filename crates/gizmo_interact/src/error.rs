//! Error types for gizmo interaction

use std::path::PathBuf;
use thiserror::Error;

/// Gizmo system errors
#[derive(Debug, Error)]
pub enum GizmoError {
    /// Configuration file could not be read
    #[error("Failed to read gizmo config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected shape
    #[error("Invalid gizmo config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration value out of range
    #[error("Invalid gizmo configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for gizmo operations
pub type Result<T> = std::result::Result<T, GizmoError>;
