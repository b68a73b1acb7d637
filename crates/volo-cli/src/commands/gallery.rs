//! `volo gallery` command implementation
//!
//! Lists the archive grouped by capture month, optionally narrowed by
//! category and title search.

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::filter::CategoryFilter;
use crate::grouping::PeriodGroup;
use crate::output;
use crate::session::Session;
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use volo_common::AssetRecord;

#[derive(Serialize)]
struct GalleryView<'a> {
    total: usize,
    category: CategoryFilter,
    query: &'a str,
    groups: Vec<PeriodGroup<&'a AssetRecord>>,
}

/// Run the gallery command
pub async fn run(
    config: &Config,
    category: Option<String>,
    search: Option<String>,
    format: String,
) -> Result<()> {
    output::validate_listing_format(&format)?;

    let category: CategoryFilter = match category {
        Some(c) => c.parse()?,
        None => CategoryFilter::All,
    };

    let catalog = Arc::new(Catalog::from_config(config)?);
    info!(assets = catalog.len(), "Catalog loaded");

    let mut session = Session::new(catalog);
    session.set_category_filter(category);
    session.set_search_query(search.unwrap_or_default());

    let groups = session.current_filtered_grouped_view();
    debug!(groups = groups.len(), "Gallery view computed");

    if format == "json" {
        let view = GalleryView {
            total: session.catalog().len(),
            category: session.category_filter(),
            query: session.search_query(),
            groups,
        };
        println!("{}", output::format_as_json(&view)?);
        return Ok(());
    }

    println!("{}", "Your Archive.".bold());
    println!(
        "Managing {} high-fidelity reconstructions captured across your journey.",
        session.catalog().len().to_string().bold()
    );
    println!();

    if groups.is_empty() {
        print_empty_hint(&session);
        return Ok(());
    }

    print!("{}", output::format_groups(&groups, &format)?);

    Ok(())
}

fn print_empty_hint(session: &Session) {
    println!("{}", "No assets match the current filter".bold().yellow());
    println!();
    println!("{}", "Try:".bold());
    if !session.search_query().is_empty() {
        println!("  {} Use a shorter title fragment", "•".blue());
    }
    if session.category_filter() != CategoryFilter::All {
        println!(
            "  {} Show every category: {}",
            "•".blue(),
            "volo gallery --category all".cyan()
        );
    }
}
