//! `volo featured` command implementation

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::filter;
use crate::grouping;
use crate::output;
use colored::Colorize;

/// Show highlighted assets
pub async fn run(config: &Config, format: String) -> Result<()> {
    output::validate_listing_format(&format)?;

    let catalog = Catalog::from_config(config)?;
    let featured = filter::featured(&catalog);

    if format == "json" {
        println!("{}", output::format_as_json(&featured)?);
        return Ok(());
    }

    if featured.is_empty() {
        println!("{}", "No featured assets in this archive".yellow());
        return Ok(());
    }

    println!(
        "{} {} featured of {}",
        "★".yellow(),
        featured.len(),
        catalog.len()
    );
    println!();
    print!("{}", output::format_groups(&grouping::group(featured), &format)?);

    Ok(())
}
