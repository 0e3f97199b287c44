//! SeaORM storage backend
//!
//! This module provides database storage using SeaORM,
//! supporting SQLite, MySQL/MariaDB, and PostgreSQL.

mod connection;
mod converters;
mod operations;
mod query;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::errors::{CalclickError, Result};
use crate::storage::models::{CalendarStat, Event, StatKey, StorageConfig};
use crate::storage::traits::StatStore;

pub use connection::{connect_generic, connect_sqlite, run_migrations};
pub use converters::{event_to_active_model, model_to_event, model_to_stat};

/// 从数据库 URL 推断数据库类型
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite:")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(CalclickError::database_config(format!(
            "无法从 URL 推断数据库类型: {}. 支持的 URL 格式: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// 裸文件路径补全为 sqlite URL
fn normalize_sqlite_url(database_url: &str) -> String {
    if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else if database_url == ":memory:" {
        "sqlite::memory:".to_string()
    } else {
        format!("sqlite://{}?mode=rwc", database_url)
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmStorage {
    /// 连接数据库并确保表结构存在
    pub async fn new(database_url: &str, config: &DatabaseConfig) -> Result<Self> {
        if database_url.is_empty() {
            return Err(CalclickError::database_config("DATABASE_URL 未设置"));
        }

        let backend_name = infer_backend_from_url(database_url)?;
        let db = if backend_name == "sqlite" {
            connect_sqlite(&normalize_sqlite_url(database_url)).await?
        } else {
            connect_generic(database_url, &backend_name, config).await?
        };

        run_migrations(&db).await?;

        let storage = SeaOrmStorage { db, backend_name };

        info!(
            "{} Storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    /// 包装已有连接（表结构需已存在）
    pub fn from_connection(db: DatabaseConnection, backend_name: &str) -> Self {
        Self {
            db,
            backend_name: backend_name.to_string(),
        }
    }
}

#[async_trait]
impl StatStore for SeaOrmStorage {
    async fn ensure_event(&self, event: &Event) -> Result<()> {
        self.insert_event_if_absent(event).await
    }

    async fn upsert_event(&self, event: &Event) -> Result<Event> {
        self.save_event(event).await
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        self.find_event(event_id).await
    }

    async fn upsert_and_increment(&self, key: &StatKey, initial: i64) -> Result<CalendarStat> {
        self.increment_stat(key, initial).await
    }

    async fn stats_for_event(&self, event_id: &str) -> Result<Vec<CalendarStat>> {
        self.find_stats_for_event(event_id).await
    }

    async fn all_stats(&self) -> Result<Vec<CalendarStat>> {
        self.find_all_stats().await
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| CalclickError::database_connection(format!("数据库不可用: {}", e)))
    }

    async fn close(&self) -> Result<()> {
        info!("Closing {} connection pool", self.backend_name);
        self.db
            .close_by_ref()
            .await
            .map_err(|e| CalclickError::database_connection(format!("关闭连接池失败: {}", e)))
    }

    fn backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: self.backend_name.clone(),
        }
    }
}
