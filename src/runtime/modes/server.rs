//! Server mode
//!
//! Starts the HTTP server with all routes and waits for Ctrl+C or SIGTERM.

use std::time::Duration;

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
    web,
};
use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::api::cors::{build_cors_middleware, validate_cors_config};
use crate::api::{RequestIdMiddleware, configure_routes};
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// 请求体上限，点击与建事件的 JSON 都很小
const MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = lifetime::startup::prepare_startup(config)
        .await
        .inspect_err(|e| tracing::error!("Server startup failed: {:#}", e))?;

    let counter_service = startup.counter_service.clone();
    let store_for_shutdown = startup.store.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors_middleware(&cors_config);

        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Cache-Control", "no-cache, no-store, must-revalidate")),
            )
            .wrap(Compress::default())
            .wrap(cors)
            .wrap(RequestIdMiddleware)
            .app_data(web::Data::new(counter_service.clone()))
            .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
            .configure(configure_routes)
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .client_disconnect_timeout(Duration::from_millis(1000))
    .workers(cpu_count)
    .disable_signals() // 信号由 lifetime::shutdown 统一处理，停止后还要关闭存储
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    info!("Starting server at http://{}", bind_address);
    let server = server.run();
    let handle = server.handle();

    // 收到信号后停止接收新连接，等待进行中的请求完成
    let signal_task = tokio::spawn(async move {
        lifetime::shutdown::wait_for_shutdown_signal().await;
        handle.stop(true).await;
    });

    let result = server.await.context("HTTP server error");
    signal_task.abort();

    lifetime::shutdown::close_store(store_for_shutdown.as_ref()).await;
    warn!("Server stopped");

    result
}
