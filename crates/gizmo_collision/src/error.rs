//! Error types for collision volumes

use crate::world::ColliderHandle;
use std::path::PathBuf;
use thiserror::Error;

/// Collision volume errors
#[derive(Debug, Error)]
pub enum CollisionError {
    /// Not enough corners for the shape convention
    #[error("Need at least {min} corners, got {count}")]
    TooFewCorners { count: usize, min: usize },

    /// Two-parallel-faces shapes need a corner count divisible by two
    #[error("Corner count must be even, got {0}")]
    OddCornerCount(usize),

    /// A corner has a NaN or infinite component
    #[error("Corner {0} is not finite")]
    NonFiniteCorner(usize),

    /// All corners lie on one plane or line
    #[error("Corners do not enclose a volume")]
    Degenerate,

    /// Shape parameters out of range
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Shape creation failed
    #[error("Failed to create collision shape: {0}")]
    ShapeCreationFailed(String),

    /// Collider not found
    #[error("Collider not found: {0:?}")]
    ColliderNotFound(ColliderHandle),

    /// Configuration file could not be read
    #[error("Failed to read collision config {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for the expected shape
    #[error("Invalid collision config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for collision operations
pub type Result<T> = std::result::Result<T, CollisionError>;
