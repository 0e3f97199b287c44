//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// calclick - "add to calendar" click counter
#[derive(Parser, Debug)]
#[command(name = "calclick")]
#[command(version)]
#[command(about = "Counts add-to-calendar clicks per event and platform", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the HTTP server (default when no command is given)
    Serve,

    /// Show click counts, for one event or across all events
    Counts {
        /// Event id; omit for totals across all events
        #[arg(long)]
        event: Option<String>,

        /// Only show this platform (google or apple)
        #[arg(long)]
        platform: Option<String>,
    },

    /// Record one click
    Click {
        /// Event id
        event: String,

        /// google or apple
        platform: String,
    },

    /// Create an event or update its name/description
    CreateEvent {
        /// Event id
        id: String,

        /// Display name (defaults to the id)
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}
