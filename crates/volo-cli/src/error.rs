//! Error types for the Volo CLI
//!
//! User-facing errors with messages that say what went wrong and what to try next.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Generation service returned an unusable answer
    #[error("Generation service error: {0}")]
    Api(String),

    /// Required file is missing
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Catalog content breaks an invariant
    #[error("Invalid catalog: {0}. Fix the catalog file or unset VOLO_CATALOG to use the built-in archive.")]
    InvalidCatalog(String),

    /// Asset id is not in the catalog
    #[error("Asset '{0}' not found in the archive. Run 'volo gallery' to list available asset ids.")]
    AssetNotFound(String),

    /// Asset model violation
    #[error("Invalid asset data: {0}")]
    Model(#[from] volo_common::VoloError),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions.")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("Network request failed: {0}. Check your internet connection and VOLO_API_URL.")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    /// YAML parsing failed
    #[error("Failed to parse YAML: {0}. Check the file syntax at the indicated line/column.")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid catalog error
    pub fn invalid_catalog(msg: impl Into<String>) -> Self {
        Self::InvalidCatalog(msg.into())
    }

    /// Create an asset-not-found error
    pub fn asset_not_found(id: impl Into<String>) -> Self {
        Self::AssetNotFound(id.into())
    }
}
