//! CLI mode

use crate::cli::Commands;
use crate::config::StaticConfig;
use crate::interfaces::cli::{CliError, run_cli_command};

/// Run a single CLI command and return its outcome to `main`
pub async fn run_cli(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    run_cli_command(cmd, config).await
}
