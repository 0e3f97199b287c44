//! Create event command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{CounterService, CreateEventRequest};

pub async fn create_event(
    service: &CounterService,
    id: String,
    name: Option<String>,
    description: Option<String>,
) -> Result<(), CliError> {
    let event = service
        .create_event(CreateEventRequest {
            id,
            name,
            description,
        })
        .await?;

    println!(
        "{} {} ({})",
        "✓ Event saved:".bold().green(),
        event.id.cyan(),
        event.name
    );
    if let Some(description) = &event.description {
        println!("  {}", description.dimmed());
    }
    Ok(())
}
