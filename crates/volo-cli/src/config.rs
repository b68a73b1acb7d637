//! Configuration management for the Volo CLI
//!
//! Settings come from defaults, then environment variables (a `.env` file is
//! loaded first when present), then command-line flags.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Default base URL of the generative text service
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Default timeout for a single generation request in seconds
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Generative service base URL
    pub api_base_url: String,

    /// Generation model name
    pub model: String,

    /// API key for the generative service
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Catalog file replacing the built-in archive
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_API_TIMEOUT_SECS,
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load config from environment variables
    pub fn from_env() -> Result<Self> {
        // A missing .env file is the normal case
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(url) = std::env::var("VOLO_API_URL") {
            config.api_base_url = url;
        }

        if let Ok(model) = std::env::var("VOLO_MODEL") {
            config.model = model;
        }

        config.api_key = std::env::var("VOLO_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        if let Ok(timeout) = std::env::var("VOLO_API_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                CliError::config(format!(
                    "VOLO_API_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    timeout
                ))
            })?;
        }

        if let Ok(path) = std::env::var("VOLO_CATALOG") {
            config.catalog_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, api_url: Option<String>, catalog: Option<PathBuf>) -> Self {
        if let Some(url) = api_url {
            self.api_base_url = url;
        }
        if let Some(path) = catalog {
            self.catalog_path = Some(path);
        }
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn catalog_path(&self) -> Option<&PathBuf> {
        self.catalog_path.as_ref()
    }

    /// Look up a single setting by key, as shown by `volo config get`
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "api_url" | "api_base_url" => self.api_base_url.clone(),
            "model" => self.model.clone(),
            "api_key" => (if self.has_api_key() { "set" } else { "unset" }).to_string(),
            "timeout_secs" => self.timeout_secs.to_string(),
            "catalog" | "catalog_path" => self
                .catalog_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in)".to_string()),
            _ => {
                return Err(CliError::config(format!(
                    "Unknown config key: {}. Valid keys: api_url, model, api_key, timeout_secs, catalog",
                    key
                )))
            },
        };
        Ok(value)
    }
}
