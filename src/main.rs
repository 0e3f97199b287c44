use clap::Parser;

use calclick::cli::{Cli, Commands};
use calclick::config::init_config;
use calclick::runtime::modes;
use calclick::system::{RunMode, init_logging, install_panic_hook};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = init_config(cli.config.as_deref());

    let command = cli.command.unwrap_or(Commands::Serve);
    let mode = if command == Commands::Serve {
        RunMode::Server
    } else {
        RunMode::Cli
    };

    // guard 必须活到进程结束，否则非阻塞日志会丢
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            std::process::exit(1);
        }
    };
    install_panic_hook(mode);

    if mode == RunMode::Server {
        if let Err(e) = modes::run_server(&config).await {
            use colored::Colorize;
            eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
            std::process::exit(1);
        }
        return Ok(());
    }

    #[cfg(feature = "cli")]
    if let Err(e) = modes::run_cli(command, &config).await {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }

    Ok(())
}
