//! Error types for the Volo3D asset model

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, VoloError>;

/// Main error type for the asset model
#[derive(Error, Debug)]
pub enum VoloError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid asset '{id}': {reason}")]
    InvalidAsset { id: String, reason: String },

    #[error("Unknown category: '{0}' (expected one of: Personal, Object, Environment, Art)")]
    UnknownCategory(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl VoloError {
    /// Create an invalid asset error
    pub fn invalid_asset(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAsset {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
