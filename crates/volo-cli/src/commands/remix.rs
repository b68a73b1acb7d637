//! `volo remix` command implementation

use crate::api::GenerativeClient;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::narrative::NarrativeAdapter;
use crate::progress::create_spinner;
use colored::Colorize;
use tracing::info;

/// Ask for a visual remix of an asset
pub async fn run(config: &Config, id: String, prompt: Vec<String>) -> Result<()> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        return Err(CliError::config("Remix prompt cannot be empty"));
    }

    let catalog = Catalog::from_config(config)?;
    let asset = catalog
        .get(&id)
        .ok_or_else(|| CliError::asset_not_found(&id))?;

    info!(id = %asset.id, prompt = %prompt, "Requesting remix");

    let adapter = NarrativeAdapter::new(GenerativeClient::from_config(config)?);
    let spinner = create_spinner("Synthesizing remix...");
    let suggestion = adapter.suggest_remix(&asset.title, &prompt).await;
    spinner.finish_and_clear();

    println!("{} {}", "Remix:".cyan().bold(), asset.title.bold());
    println!("  {}", prompt.dimmed());
    println!();
    println!("{}", suggestion);

    Ok(())
}
