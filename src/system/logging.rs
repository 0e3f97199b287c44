//! Logging system initialization
//!
//! 按 `[logging]` 配置初始化 tracing：stdout 或文件（可按天滚动），
//! text 或 json 格式。`RUST_LOG` 存在时优先于配置中的 level。

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LOG_FILE_NAME: &str = "calclick.log";

fn build_writer(config: &LoggingConfig) -> Result<Box<dyn Write + Send + Sync>> {
    let Some(log_file) = config.file.as_deref().filter(|f| !f.is_empty()) else {
        return Ok(Box::new(std::io::stdout()));
    };

    if !config.enable_rotation {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)
            .with_context(|| format!("Failed to open log file {}", log_file))?;
        return Ok(Box::new(file));
    }

    let path = Path::new(log_file);
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let filename = path
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or(DEFAULT_LOG_FILE_NAME);

    let appender = rolling::Builder::new()
        .rotation(rolling::Rotation::DAILY)
        .filename_prefix(filename.trim_end_matches(".log"))
        .filename_suffix("log")
        .max_log_files(config.max_backups.max(1) as usize)
        .build(dir)
        .context("Failed to create rolling log appender")?;
    Ok(Box::new(appender))
}

/// Initialize logging system based on configuration
///
/// The returned guard must stay alive for the lifetime of the program,
/// dropping it flushes and stops the background writer.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let writer = build_writer(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .context("Invalid logging.level")?;
    let to_console = config.file.as_deref().is_none_or(|f| f.is_empty());

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        .with_ansi(to_console);

    let installed = if config.format.eq_ignore_ascii_case("json") {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotating_writer_creates_directory_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = LoggingConfig {
            file: Some(dir.path().join("calclick.log").to_string_lossy().to_string()),
            ..LoggingConfig::default()
        };

        let mut writer = build_writer(&config).unwrap();
        writer.write_all(b"hello\n").unwrap();
        writer.flush().unwrap();

        let written = std::fs::read_dir(dir.path()).unwrap().count();
        assert!(written >= 1);
    }

    #[test]
    fn test_plain_file_writer_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("plain.log");
        let config = LoggingConfig {
            file: Some(path.to_string_lossy().to_string()),
            enable_rotation: false,
            ..LoggingConfig::default()
        };

        for _ in 0..2 {
            let mut writer = build_writer(&config).unwrap();
            writer.write_all(b"line\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "line\nline\n");
    }
}
