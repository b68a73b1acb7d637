//! `volo browse` command implementation
//!
//! Interactive session over the archive. Provenance text is fetched in a
//! background task while the menus stay usable; answers that arrive after
//! another asset was opened are dropped.

use crate::api::GenerativeClient;
use crate::catalog::Catalog;
use crate::commands::show::print_detail;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::filter::CategoryFilter;
use crate::narrative::{NarrativeAdapter, TextGenerator};
use crate::progress::create_spinner;
use crate::session::{NarrativeState, NarrativeTicket, Session};
use colored::Colorize;
use inquire::{InquireError, Select, Text};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

type NarrativeMessage = (NarrativeTicket, String);

const OPEN_ASSET: &str = "Open an asset";
const FILTER_CATEGORY: &str = "Filter by category";
const SEARCH_TITLES: &str = "Search titles";
const CLEAR_SEARCH: &str = "Clear search";
const EXIT: &str = "✕ Exit";

const OLDER: &str = "◀ Older version";
const NEWER: &str = "Newer version ▶";
const JUMP: &str = "Jump to version...";
const WAIT: &str = "Wait for provenance";
const REMIX: &str = "Remix...";
const BACK: &str = "← Back to gallery";

/// Run the browse command
pub async fn run(config: &Config) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(CliError::config(
            "'volo browse' needs an interactive terminal. Use 'volo gallery' or 'volo show' instead",
        ));
    }

    let catalog = Arc::new(Catalog::from_config(config)?);
    let adapter = Arc::new(NarrativeAdapter::new(GenerativeClient::from_config(config)?));
    let wait_limit = Duration::from_secs(config.timeout_secs.saturating_add(1));

    let (tx, mut rx) = mpsc::unbounded_channel::<NarrativeMessage>();
    let mut session = Session::new(catalog);

    loop {
        drain_narratives(&mut session, &mut rx);
        print_summary(&session);

        let actions = vec![
            OPEN_ASSET.to_string(),
            format!("{} ({})", FILTER_CATEGORY, session.category_filter()),
            format!("{} ({})", SEARCH_TITLES, display_query(session.search_query())),
            CLEAR_SEARCH.to_string(),
            EXIT.to_string(),
        ];

        let Some(action) = prompt(Select::new("What would you like to do?", actions).prompt())? else {
            break;
        };

        if action == OPEN_ASSET {
            let Some(id) = pick_asset(&session)? else {
                continue;
            };
            let ticket = session.select_asset(&id)?;
            spawn_narrative(&session, &adapter, ticket, tx.clone());
            asset_loop(&mut session, &adapter, &mut rx, wait_limit).await?;
            session.clear_selection();
        } else if action.starts_with(FILTER_CATEGORY) {
            if let Some(category) =
                prompt(Select::new("Category:", CategoryFilter::choices()).prompt())?
            {
                session.set_category_filter(category);
            }
        } else if action.starts_with(SEARCH_TITLES) {
            if let Some(query) = prompt(
                Text::new("Title contains:")
                    .with_initial_value(session.search_query())
                    .prompt(),
            )? {
                session.set_search_query(query);
            }
        } else if action == CLEAR_SEARCH {
            session.set_search_query("");
        } else {
            break;
        }
    }

    Ok(())
}

/// Apply every narrative answer that has arrived; stale ones are dropped
pub(crate) fn drain_narratives(session: &mut Session, rx: &mut UnboundedReceiver<NarrativeMessage>) {
    while let Ok((ticket, text)) = rx.try_recv() {
        session.resolve_narrative(&ticket, text);
    }
}

/// Start fetching the provenance of the selected asset in the background
pub(crate) fn spawn_narrative<G>(
    session: &Session,
    adapter: &Arc<NarrativeAdapter<G>>,
    ticket: NarrativeTicket,
    tx: UnboundedSender<NarrativeMessage>,
) where
    G: TextGenerator + 'static,
{
    let Some(asset) = session.selected_asset() else {
        return;
    };
    let title = asset.title.clone();
    let description = asset.description.clone().unwrap_or_default();
    let adapter = Arc::clone(adapter);

    debug!(asset = %ticket.asset_id(), generation = ticket.generation(), "Spawning narrative fetch");

    tokio::spawn(async move {
        let text = adapter.fetch_narrative(&title, &description).await;
        // The receiver is gone once the session ends
        let _ = tx.send((ticket, text));
    });
}

async fn asset_loop<G>(
    session: &mut Session,
    adapter: &Arc<NarrativeAdapter<G>>,
    rx: &mut UnboundedReceiver<NarrativeMessage>,
    wait_limit: Duration,
) -> Result<()>
where
    G: TextGenerator + 'static,
{
    loop {
        drain_narratives(session, rx);

        let (Some(view), Some(timeline)) = (session.active_view_state(), session.timeline()) else {
            return Ok(());
        };
        print_detail(&view, timeline);

        let loading = matches!(view.narrative, NarrativeState::Loading);
        if loading {
            println!("{}", "Provenance loading...".dimmed());
        }

        let mut actions = Vec::new();
        if timeline.is_multi_version() {
            actions.extend([OLDER, NEWER, JUMP]);
        }
        if loading {
            actions.push(WAIT);
        }
        actions.extend([REMIX, BACK]);

        let Some(action) = prompt(Select::new("Asset actions:", actions).prompt())? else {
            return Ok(());
        };

        match action {
            OLDER => {
                session.step_version_back();
            },
            NEWER => {
                session.step_version_forward();
            },
            JUMP => jump_to_version(session)?,
            WAIT => wait_for_narrative(session, rx, wait_limit).await,
            REMIX => remix(session, adapter).await?,
            _ => return Ok(()),
        }
    }
}

fn jump_to_version(session: &mut Session) -> Result<()> {
    let Some(timeline) = session.timeline() else {
        return Ok(());
    };
    let labels: Vec<String> = timeline
        .versions()
        .iter()
        .map(|v| format!("{}  {}", v.date, v.label))
        .collect();

    if let Some(choice) = prompt(Select::new("Version:", labels).raw_prompt())? {
        session.select_version(choice.index);
    }
    Ok(())
}

async fn wait_for_narrative(
    session: &mut Session,
    rx: &mut UnboundedReceiver<NarrativeMessage>,
    limit: Duration,
) {
    let spinner = create_spinner("Consulting the archive...");
    let deadline = tokio::time::Instant::now() + limit;

    while matches!(session.narrative(), Some(NarrativeState::Loading)) {
        match tokio::time::timeout_at(deadline, rx.recv()).await {
            Ok(Some((ticket, text))) => {
                session.resolve_narrative(&ticket, text);
            },
            Ok(None) | Err(_) => break,
        }
    }

    spinner.finish_and_clear();
}

async fn remix<G: TextGenerator>(session: &Session, adapter: &NarrativeAdapter<G>) -> Result<()> {
    let Some(asset) = session.selected_asset() else {
        return Ok(());
    };

    let Some(wish) = prompt(Text::new("Describe the remix:").prompt())? else {
        return Ok(());
    };
    if wish.trim().is_empty() {
        return Ok(());
    }

    let spinner = create_spinner("Synthesizing remix...");
    let suggestion = adapter.suggest_remix(&asset.title, &wish).await;
    spinner.finish_and_clear();

    println!();
    println!("{}", "Remix".magenta().bold());
    println!("  {}", suggestion);
    Ok(())
}

fn pick_asset(session: &Session) -> Result<Option<String>> {
    let groups = session.current_filtered_grouped_view();
    if groups.is_empty() {
        println!("{}", "No assets match the current filter".yellow());
        return Ok(None);
    }

    let entries: Vec<(String, String)> = groups
        .iter()
        .flat_map(|g| {
            g.items
                .iter()
                .map(move |a| (a.id.clone(), format!("{} · {} [{}]", g.label, a.title, a.category)))
        })
        .collect();
    let labels: Vec<String> = entries.iter().map(|(_, label)| label.clone()).collect();

    let choice = prompt(Select::new("Select an asset:", labels).with_page_size(15).raw_prompt())?;
    Ok(choice.and_then(|c| entries.get(c.index).map(|(id, _)| id.clone())))
}

fn print_summary(session: &Session) {
    let shown = session.filtered_assets().len();
    println!();
    println!(
        "{} Showing {} of {} assets",
        "✓".green(),
        shown,
        session.catalog().len()
    );
}

fn display_query(query: &str) -> String {
    if query.is_empty() {
        "none".to_string()
    } else {
        format!("\"{}\"", query)
    }
}

/// Treat Esc and Ctrl+C as "go back"
fn prompt<T>(answer: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
