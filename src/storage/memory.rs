use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use super::models::{CalendarStat, Event, StatKey, StorageConfig};
use super::traits::StatStore;
use crate::errors::Result;

/// 基于 DashMap 的内存存储
///
/// entry API 持有分片写锁，create-or-increment 在同一把锁内完成。
#[derive(Default, Clone)]
pub struct MemoryStore {
    events: Arc<DashMap<String, Event>>,
    stats: Arc<DashMap<(String, String), i64>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 直接写入一行计数，不经过校验（测试用，可模拟未知平台数据）
    pub fn insert_raw(&self, event_id: &str, platform: &str, count: i64) {
        self.stats
            .insert((event_id.to_string(), platform.to_string()), count);
    }

    pub fn stat_count(&self) -> usize {
        self.stats.len()
    }
}

#[async_trait]
impl StatStore for MemoryStore {
    async fn ensure_event(&self, event: &Event) -> Result<()> {
        self.events
            .entry(event.id.clone())
            .or_insert_with(|| event.clone());
        Ok(())
    }

    async fn upsert_event(&self, event: &Event) -> Result<Event> {
        self.events.insert(event.id.clone(), event.clone());
        Ok(event.clone())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>> {
        Ok(self.events.get(event_id).map(|e| e.value().clone()))
    }

    async fn upsert_and_increment(&self, key: &StatKey, initial: i64) -> Result<CalendarStat> {
        let map_key = (key.event_id.clone(), key.platform.as_str().to_string());
        let count = *self
            .stats
            .entry(map_key)
            .and_modify(|c| *c += 1)
            .or_insert(initial);

        Ok(CalendarStat {
            event_id: key.event_id.clone(),
            platform: key.platform.as_str().to_string(),
            count,
        })
    }

    async fn stats_for_event(&self, event_id: &str) -> Result<Vec<CalendarStat>> {
        let mut stats: Vec<CalendarStat> = self
            .stats
            .iter()
            .filter(|entry| entry.key().0 == event_id)
            .map(|entry| CalendarStat {
                event_id: entry.key().0.clone(),
                platform: entry.key().1.clone(),
                count: *entry.value(),
            })
            .collect();
        stats.sort_by(|a, b| a.platform.cmp(&b.platform));
        Ok(stats)
    }

    async fn all_stats(&self) -> Result<Vec<CalendarStat>> {
        Ok(self
            .stats
            .iter()
            .map(|entry| CalendarStat {
                event_id: entry.key().0.clone(),
                platform: entry.key().1.clone(),
                count: *entry.value(),
            })
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend_config(&self) -> StorageConfig {
        StorageConfig {
            storage_type: "memory".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::models::Platform;

    #[tokio::test]
    async fn test_upsert_and_increment_creates_then_increments() {
        let store = MemoryStore::new();
        let key = StatKey::new("fest", Platform::Google);

        let first = store.upsert_and_increment(&key, 1).await.unwrap();
        assert_eq!(first.count, 1);

        let second = store.upsert_and_increment(&key, 1).await.unwrap();
        assert_eq!(second.count, 2);
        assert_eq!(store.stat_count(), 1);
    }

    #[tokio::test]
    async fn test_ensure_event_keeps_existing() {
        let store = MemoryStore::new();
        let named = Event {
            id: "fest".to_string(),
            name: "LümenFest".to_string(),
            description: Some("desc".to_string()),
        };
        store.upsert_event(&named).await.unwrap();
        store.ensure_event(&Event::minimal("fest")).await.unwrap();

        let loaded = store.get_event("fest").await.unwrap().unwrap();
        assert_eq!(loaded.name, "LümenFest");
    }

    #[tokio::test]
    async fn test_stats_for_event_sorted_by_platform() {
        let store = MemoryStore::new();
        store.insert_raw("fest", "google", 2);
        store.insert_raw("fest", "apple", 1);
        store.insert_raw("other", "apple", 7);

        let stats = store.stats_for_event("fest").await.unwrap();
        let platforms: Vec<&str> = stats.iter().map(|s| s.platform.as_str()).collect();
        assert_eq!(platforms, vec!["apple", "google"]);
    }
}
