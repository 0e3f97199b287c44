//! CLI interface module
//!
//! One-shot commands that talk to the configured store directly, through the
//! same `CounterService` the HTTP server uses.

pub mod commands;

use std::fmt;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::errors::CalclickError;
use crate::runtime::lifetime::{shutdown::close_store, startup::prepare_startup};
use commands::{config_generate, create_event, record_click, show_counts};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<CalclickError> for CliError {
    fn from(err: CalclickError) -> Self {
        match err {
            CalclickError::Validation(msg) | CalclickError::NotFound(msg) => {
                CliError::ParseError(msg)
            }
            other => CliError::StorageError(other.format_simple()),
        }
    }
}

/// Run a CLI command from clap-parsed input
///
/// `Serve` is dispatched by the caller and never reaches here.
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // Generate doesn't need a store
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_generate(output_path, force).await;
    }

    let startup = prepare_startup(config)
        .await
        .map_err(|e| CliError::StorageError(format!("{:#}", e)))?;
    let service = startup.counter_service.as_ref();

    let result = match cmd {
        Commands::Counts { event, platform } => show_counts(service, event, platform).await,
        Commands::Click { event, platform } => record_click(service, &event, &platform).await,
        Commands::CreateEvent {
            id,
            name,
            description,
        } => create_event(service, id, name, description).await,
        Commands::Serve | Commands::Config { .. } => Err(CliError::CommandError(
            "command is not handled by the CLI runner".to_string(),
        )),
    };

    close_store(startup.store.as_ref()).await;
    result
}
