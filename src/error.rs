//! Error types for gotools-binstubs
//!
//! Centralized error handling using thiserror.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// All error types that can occur while generating binstubs
#[derive(Debug, Error)]
pub enum BinstubsError {
    /// Aggregator file requested without a package name
    #[error("aggregatorPackageName is required when emitAggregatorFile is enabled")]
    MissingPackageName,

    /// Filesystem read/write/mkdir failure
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Binstub name would place the script outside the binstubs directory
    #[error("Invalid binstub name '{0}': must be a plain file name")]
    InvalidBinstubName(String),

    /// Comment annotation failed to parse
    #[error("Malformed annotation: {0}")]
    MalformedAnnotation(String),

    /// Mutually exclusive CLI modes requested together
    #[error("Usage conflict: {0}")]
    UsageConflict(String),

    /// Configuration document failed to deserialize
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl BinstubsError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result type alias for binstub generation
pub type Result<T> = std::result::Result<T, BinstubsError>;
