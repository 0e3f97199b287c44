use std::sync::Arc;

use tracing::warn;

use crate::config::DatabaseConfig;
use crate::errors::Result;

pub mod backend;
pub mod memory;
pub mod models;
pub mod traits;

pub use backend::SeaOrmStorage;
pub use memory::MemoryStore;
pub use models::{CalendarStat, Event, Platform, PlatformCounts, StatKey, StorageConfig};
pub use traits::StatStore;

/// 使用内存存储的特殊 URL
pub const MEMORY_STORE_URL: &str = "memory://";

pub struct StorageFactory;

impl StorageFactory {
    /// 按配置创建存储；`memory://` 使用进程内存储，其余按 URL 推断数据库类型
    pub async fn create(config: &DatabaseConfig) -> Result<Arc<dyn StatStore>> {
        let database_url = config.database_url.trim();

        if database_url == MEMORY_STORE_URL {
            warn!("Using in-memory store, counts will be lost on restart");
            return Ok(Arc::new(MemoryStore::new()));
        }

        let storage = SeaOrmStorage::new(database_url, config).await?;
        Ok(Arc::new(storage))
    }
}
