//! `volo config` command implementation
//!
//! Prints the effective configuration. Values are set through environment
//! variables or flags, never written by the CLI.

use crate::config::Config;
use crate::error::Result;
use colored::Colorize;

/// Print one configuration value
pub async fn get(config: &Config, key: String) -> Result<()> {
    println!("{}", config.get(&key)?);
    Ok(())
}

/// Print all configuration values
pub async fn show(config: &Config) -> Result<()> {
    println!("{}", "Volo CLI Configuration:".cyan().bold());
    println!();
    for key in ["api_url", "model", "api_key", "timeout_secs", "catalog"] {
        println!("{:<15} {}", format!("{}:", key), config.get(key)?);
    }
    println!();
    println!("{}", "Environment Variables:".cyan());
    println!("  VOLO_API_URL           - Generation service base URL");
    println!("  VOLO_MODEL             - Generation model");
    println!("  VOLO_API_KEY           - API key (falls back to API_KEY)");
    println!("  VOLO_API_TIMEOUT_SECS  - Request timeout in seconds");
    println!("  VOLO_CATALOG           - Catalog YAML replacing the built-in archive");

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_get() {
        let config = Config::default();
        assert!(get(&config, "model".to_string()).await.is_ok());
        assert!(get(&config, "server_url".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_config_show() {
        assert!(show(&Config::default()).await.is_ok());
    }
}
