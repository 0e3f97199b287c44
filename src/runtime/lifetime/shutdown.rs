use std::time::Duration;

use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::storage::StatStore;

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 10;

async fn ctrl_c() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        );
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(e) => {
            // 无法注册 SIGTERM 时只依赖 Ctrl+C
            warn!("Failed to listen for SIGTERM: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

/// 等待 Ctrl+C 或 SIGTERM；监听 Ctrl+C 失败时同样视为收到信号
pub async fn wait_for_shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => {}
        _ = terminate() => {}
    }
    info!("Shutdown signal received, stopping server...");
}

/// 关闭存储；超时或失败只记录日志
pub async fn close_store(store: &dyn StatStore) {
    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), store.close()).await {
        Ok(Ok(())) => info!("Storage closed"),
        Ok(Err(e)) => error!("Failed to close storage: {}", e),
        Err(_) => error!(
            "Closing storage timed out after {} seconds",
            SHUTDOWN_TIMEOUT_SECS
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[cfg(unix)]
    #[tokio::test]
    async fn test_sigterm_triggers_shutdown() {
        let waiter = tokio::spawn(wait_for_shutdown_signal());
        // 等待信号处理器注册
        tokio::time::sleep(Duration::from_millis(100)).await;

        let status = std::process::Command::new("kill")
            .args(["-TERM", &std::process::id().to_string()])
            .status()
            .unwrap();
        assert!(status.success());

        timeout(Duration::from_secs(5), waiter)
            .await
            .expect("shutdown signal not observed")
            .unwrap();
    }

    #[tokio::test]
    async fn test_close_store_completes() {
        close_store(&MemoryStore::new()).await;
    }
}
