use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::config::StaticConfig;
use crate::services::CounterService;
use crate::storage::{StatStore, StorageFactory};

pub struct StartupContext {
    pub store: Arc<dyn StatStore>,
    pub counter_service: Arc<CounterService>,
}

/// 创建存储并组装服务，server 和 CLI 共用
pub async fn prepare_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = std::time::Instant::now();
    debug!("Starting pre-startup processing...");

    let store = StorageFactory::create(&config.database)
        .await
        .context("Failed to create storage backend")?;
    info!(
        "Using storage backend: {}",
        store.backend_config().storage_type
    );

    let counter_service = Arc::new(CounterService::new(store.clone()));

    debug!("Pre-startup finished in {:?}", start_time.elapsed());
    Ok(StartupContext {
        store,
        counter_service,
    })
}
