//! `volo show` command implementation
//!
//! Detail view of one asset: attributes, version timeline and a generated
//! provenance record.

use crate::api::GenerativeClient;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::narrative::NarrativeAdapter;
use crate::progress::create_spinner;
use crate::session::{ActiveView, Session};
use crate::timeline::{TimelineSnapshot, VersionTimeline};
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};
use volo_common::AssetRecord;

#[derive(Serialize)]
struct ShowView<'a> {
    asset: &'a AssetRecord,
    timeline: TimelineSnapshot<'a>,
    narrative: Option<&'a str>,
}

/// Run the show command
///
/// `version` is 1-based, as printed in the timeline.
pub async fn run(
    config: &Config,
    id: String,
    version: Option<usize>,
    no_narrative: bool,
    format: String,
) -> Result<()> {
    if format != "text" && format != "json" {
        return Err(CliError::config(format!(
            "Unknown format: '{}'. Use text or json",
            format
        )));
    }

    let catalog = Arc::new(Catalog::from_config(config)?);
    let mut session = Session::new(Arc::clone(&catalog));

    let ticket = match session.select_asset(&id) {
        Ok(ticket) => ticket,
        Err(e) => {
            print_suggestions(&catalog, &id);
            return Err(e);
        },
    };

    if let Some(n) = version {
        let applied = n.checked_sub(1).is_some_and(|i| session.select_version(i));
        if !applied {
            warn!(version = n, id = %id, "Version not available, showing latest");
            eprintln!(
                "{} Version {} does not exist for '{}'; showing the latest",
                "!".yellow(),
                n,
                id
            );
        }
    }

    if !no_narrative {
        let asset = session
            .selected_asset()
            .ok_or_else(|| CliError::asset_not_found(&id))?;
        let title = asset.title.clone();
        let description = asset.description.clone().unwrap_or_default();

        let adapter = NarrativeAdapter::new(GenerativeClient::from_config(config)?);
        let spinner = create_spinner("Consulting the archive...");
        let text = adapter.fetch_narrative(&title, &description).await;
        spinner.finish_and_clear();

        session.resolve_narrative(&ticket, text);
    }

    let view = session
        .active_view_state()
        .ok_or_else(|| CliError::asset_not_found(&id))?;
    debug!(id = %view.asset.id, "Rendering asset detail");

    if format == "json" {
        let show = ShowView {
            asset: view.asset,
            timeline: view.timeline.clone(),
            narrative: view.narrative.text(),
        };
        println!("{}", serde_json::to_string_pretty(&show)?);
    } else {
        let timeline = session.timeline().ok_or_else(|| CliError::asset_not_found(&id))?;
        print_detail(&view, timeline);
    }

    Ok(())
}

fn print_suggestions(catalog: &Catalog, id: &str) {
    let similar = catalog.similar_ids(id);
    if similar.is_empty() {
        return;
    }

    eprintln!("{}", "Did you mean:".bold());
    for candidate in similar {
        let title = catalog.get(candidate).map(|a| a.title.as_str()).unwrap_or("");
        eprintln!("  {} {} ({})", "•".blue(), candidate.cyan(), title);
    }
}

pub(crate) fn print_detail(view: &ActiveView<'_>, timeline: &VersionTimeline) {
    let asset = view.asset;

    println!();
    println!("{}", "═".repeat(60).blue());
    println!("{}", format!("  {}", asset.title).bold());
    println!("{}", "═".repeat(60).blue());
    println!();

    println!("{:<12} {}", "ID:", asset.id);
    println!("{:<12} {}", "Category:", asset.category);
    println!("{:<12} {}", "Captured:", asset.date);
    println!("{:<12} {}", "Polygons:", asset.poly_count);
    println!("{:<12} {}", "Size:", asset.file_size);
    if let Some(ref author) = asset.author {
        println!("{:<12} {}", "Author:", author.name);
    }
    if !asset.tags.is_empty() {
        let tags: Vec<String> = asset.tags.iter().map(|t| format!("#{}", t)).collect();
        println!("{:<12} {}", "Tags:", tags.join(" ").cyan());
    }
    if let Some(model) = view.timeline.active_model {
        println!("{:<12} {}", "Model:", model);
    }
    if let Some(ref description) = asset.description {
        println!();
        println!("{}", description);
    }

    if timeline.is_multi_version() {
        print_timeline(timeline);
    }

    if let Some(text) = view.narrative.text() {
        println!();
        println!("{}", "Provenance".cyan().bold());
        println!("  \"{}\"", text.italic());
    }
    println!();
}

fn print_timeline(timeline: &VersionTimeline) {
    println!();
    println!("{}", "Evolution Timeline".cyan().bold());

    for (i, version) in timeline.versions().iter().enumerate() {
        let line = format!("{:>3}. {}  {}", i + 1, version.date, version.label);
        if timeline.active_index() == Some(i) {
            println!("  {} {}", "●".green(), line.bold());
        } else {
            println!("  {} {}", "○".dimmed(), line);
        }
    }

    if let (Some(first), Some(last), Some(position)) =
        (timeline.first_label(), timeline.last_label(), timeline.position())
    {
        let width = 30usize;
        let filled = (position * width as f64).round() as usize;
        println!(
            "     {} [{}{}] {}",
            first.dimmed(),
            "━".repeat(filled).green(),
            "─".repeat(width - filled),
            last.dimmed()
        );
    }
}
