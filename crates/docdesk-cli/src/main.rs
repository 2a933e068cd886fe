//! docdesk CLI
//!
//! Host process for the docdesk document service. `serve` exposes the
//! message channel over stdin/stdout for a UI; the other commands drive
//! the service directly from the shell.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docdesk_core::{Config, DocumentService, LocalGateway, ServiceError};

mod commands;
mod editor;
mod logging;
mod output;
mod picker;

use output::{Output, OutputFormat};
use picker::TuiPicker;

#[derive(Parser)]
#[command(name = "docdesk")]
#[command(about = "docdesk - documents, favorites and history for a desktop UI")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the message channel on stdin/stdout
    Serve,
    /// Open a file and show its document
    Open {
        /// File to open
        path: PathBuf,
    },
    /// Edit a file in $EDITOR and save it back
    Edit {
        /// File to edit
        path: PathBuf,
        /// Save without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show file metadata
    Meta {
        /// File to inspect
        path: PathBuf,
    },
    /// Choose a file (or folder) interactively
    Pick {
        /// Choose a folder instead of a file
        #[arg(long)]
        folder: bool,
    },
    /// Show system information
    System,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, log_file, log_level, history_limit, start_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Config commands edit the file and never start the service
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    logging::init(&config);

    let service = build_service(&config);

    let result = match cli.command {
        Commands::Serve => commands::serve::run(Arc::new(service)).await,
        Commands::Open { path } => commands::file::open(&service, &path, &output),
        Commands::Edit { path, yes } => commands::file::edit(&service, &path, yes, &output),
        Commands::Meta { path } => commands::file::meta(&service, &path, &output),
        Commands::Pick { folder } => commands::pick::pick(&service, folder, &output),
        Commands::System => commands::system::show(&output),
        Commands::Config { .. } => unreachable!(), // Handled above
    };

    if let Err(e) = &result {
        if let Some(hint) = recovery_hint(e) {
            eprintln!("Hint: {}", hint);
        }
    }
    result
}

/// Suggestion for filesystem and picker failures
fn recovery_hint(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<ServiceError>()? {
        ServiceError::Io { source, .. } => source.recovery_suggestion(),
        _ => None,
    }
}

/// Wire the service to the local filesystem and the terminal picker
fn build_service(config: &Config) -> DocumentService {
    let picker = TuiPicker::new(config.picker_start_dir());
    DocumentService::from_config(LocalGateway::with_picker(picker), config)
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
