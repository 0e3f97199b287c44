//! Show counts command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{CounterService, EventCounts};
use crate::storage::{Platform, PlatformCounts};

fn print_counts(counts: &PlatformCounts) {
    for platform in [Platform::Google, Platform::Apple] {
        println!(
            "  {:<8} {}",
            platform.as_str().blue(),
            counts.get(platform).to_string().green()
        );
    }
}

/// 不带 `--event` 时显示全部事件的汇总
pub async fn show_counts(
    service: &CounterService,
    event: Option<String>,
    platform: Option<String>,
) -> Result<(), CliError> {
    let Some(event_id) = event else {
        let counts = service.global_counts().await?;
        println!("{}", "Clicks across all events:".bold().green());
        print_counts(&counts);
        return Ok(());
    };

    match service
        .counts_for_event(&event_id, platform.as_deref())
        .await?
    {
        EventCounts::All { event_id, counts } => {
            println!("{} {}", "Clicks for".bold().green(), event_id.cyan());
            print_counts(&counts);
        }
        EventCounts::Single {
            event_id,
            platform,
            count,
        } => {
            println!(
                "{} {} / {}: {}",
                "Clicks for".bold().green(),
                event_id.cyan(),
                platform.as_str().blue(),
                count.to_string().green()
            );
        }
    }
    Ok(())
}
