//! Record click command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::CounterService;

pub async fn record_click(
    service: &CounterService,
    event_id: &str,
    platform: &str,
) -> Result<(), CliError> {
    let stat = service.record_click(event_id, Some(platform)).await?;

    println!(
        "{} {} / {} -> {}",
        "✓".bold().green(),
        stat.event_id.cyan(),
        stat.platform.blue(),
        stat.count.to_string().green()
    );
    Ok(())
}
