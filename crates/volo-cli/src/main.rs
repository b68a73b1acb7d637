//! Volo CLI - Main entry point

use clap::Parser;
use std::process;
use tracing::error;
use volo_cli::config::Config;
use volo_cli::{Cli, Commands, ConfigCommand};
use volo_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.markdown_help {
        println!("{}", clap_markdown::help_markdown::<Cli>());
        return;
    }

    let Some(ref command) = cli.command else {
        eprintln!("Error: A subcommand is required");
        eprintln!();
        eprintln!("For more information, try '--help'.");
        process::exit(2);
    };

    let level = if cli.verbose { LogLevel::Debug } else { LogLevel::Warn };
    let log_config = LogConfig::builder()
        .level(level)
        .output(LogOutput::Console)
        .log_file_prefix("volo")
        .build();

    // Environment variables take precedence over flags
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI keeps working without logging
    let _guard = init_logging(&log_config).ok();

    if let Err(e) = execute_command(&cli, command).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, command: &Commands) -> volo_cli::Result<()> {
    let config = Config::from_env()?.with_overrides(cli.api_url.clone(), cli.catalog.clone());

    match command {
        Commands::Gallery {
            category,
            search,
            format,
        } => {
            volo_cli::commands::gallery::run(&config, category.clone(), search.clone(), format.clone())
                .await
        },

        Commands::Featured { format } => {
            volo_cli::commands::featured::run(&config, format.clone()).await
        },

        Commands::Show {
            id,
            version,
            no_narrative,
            format,
        } => {
            volo_cli::commands::show::run(&config, id.clone(), *version, *no_narrative, format.clone())
                .await
        },

        Commands::Remix { id, prompt } => {
            volo_cli::commands::remix::run(&config, id.clone(), prompt.clone()).await
        },

        Commands::Browse => volo_cli::commands::browse::run(&config).await,

        Commands::Config { command } => match command {
            ConfigCommand::Get { key } => {
                volo_cli::commands::config::get(&config, key.clone()).await
            },
            ConfigCommand::Show => volo_cli::commands::config::show(&config).await,
        },
    }
}
