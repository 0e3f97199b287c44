//! Panic handler module
//!
//! Server mode: panic 通过 tracing 记录（handler 中的 panic 随后由 FaultGuard 转为 500）。
//! CLI mode: 只打印简短信息。

use std::panic;

/// Running mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Server,
    Cli,
}

fn payload_message(info: &panic::PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Install custom panic hook
pub fn install_panic_hook(mode: RunMode) {
    panic::set_hook(Box::new(move |info| {
        let message = payload_message(info);
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "Unknown location".to_string());
        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("<unnamed>");

        match mode {
            RunMode::Server => {
                tracing::error!(
                    thread = thread_name,
                    location = %location,
                    "panic: {}",
                    message
                );
            }
            RunMode::Cli => {
                use colored::Colorize;
                eprintln!();
                eprintln!("{} {}", "Program panicked:".red().bold(), message);
                eprintln!("{} {}", "Location:".yellow(), location);
                eprintln!();
            }
        }
    }));
}
