//! 存储抽象
//!
//! CounterService 只依赖这里的 trait，具体实现（SeaORM / 内存）在启动时注入。

use async_trait::async_trait;

use super::models::{CalendarStat, Event, StatKey, StorageConfig};
use crate::errors::Result;

#[async_trait]
pub trait StatStore: Send + Sync {
    /// 确保事件存在；已存在时不做任何修改（幂等）
    async fn ensure_event(&self, event: &Event) -> Result<()>;

    /// 创建或覆盖事件的名称与描述
    async fn upsert_event(&self, event: &Event) -> Result<Event>;

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>>;

    /// 原子地创建或递增计数
    ///
    /// 行不存在时以 `initial` 创建，存在时 `count + 1`。并发调用不会丢失更新。
    async fn upsert_and_increment(&self, key: &StatKey, initial: i64) -> Result<CalendarStat>;

    /// 某个事件的全部计数行，按 platform 升序
    async fn stats_for_event(&self, event_id: &str) -> Result<Vec<CalendarStat>>;

    /// 所有事件的全部计数行
    async fn all_stats(&self) -> Result<Vec<CalendarStat>>;

    /// 存储连通性检查
    async fn ping(&self) -> Result<()>;

    /// 关闭底层连接池；无连接的实现什么都不做
    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn backend_config(&self) -> StorageConfig;
}
