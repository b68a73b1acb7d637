//! Volo CLI Library
//!
//! Command-line front end for the Volo3D archive of 3D reconstructions.
//!
//! # Overview
//!
//! - **Gallery**: Archive grouped by capture month, filtered by category and title (`volo gallery`)
//! - **Featured**: Highlighted assets (`volo featured`)
//! - **Detail**: One asset with its version timeline and generated provenance (`volo show`)
//! - **Remix**: Generated visual remix ideas (`volo remix`)
//! - **Browsing**: Interactive session with background provenance loading (`volo browse`)
//! - **Configuration**: Effective settings (`volo config`)

pub mod api;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod narrative;
pub mod output;
pub mod progress;
pub mod session;
pub mod timeline;

// Re-export commonly used types
pub use catalog::Catalog;
pub use error::{CliError, Result};
pub use session::Session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Volo3D - archive of high-fidelity 3D reconstructions
#[derive(Parser, Debug)]
#[command(name = "volo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog YAML file replacing the built-in archive
    #[arg(long, env = "VOLO_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Generation service base URL
    #[arg(long, env = "VOLO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Print the full command reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the archive grouped by capture month
    Gallery {
        /// Category to show (all, object, environment, personal, art)
        #[arg(short, long)]
        category: Option<String>,

        /// Case-insensitive title fragment
        #[arg(short, long)]
        search: Option<String>,

        /// Output format (table, compact, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// List highlighted assets
    Featured {
        /// Output format (table, compact, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Show one asset with its timeline and provenance
    Show {
        /// Asset id
        id: String,

        /// Version to show, 1-based (defaults to the latest)
        #[arg(long)]
        version: Option<usize>,

        /// Skip the generated provenance record
        #[arg(long)]
        no_narrative: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Suggest a visual remix of an asset
    Remix {
        /// Asset id
        id: String,

        /// What the remix should look like
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },

    /// Browse the archive interactively
    Browse,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Get configuration value
    Get {
        /// Configuration key (api_url, model, api_key, timeout_secs, catalog)
        key: String,
    },

    /// Show all configuration
    Show,
}
