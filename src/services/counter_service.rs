//! Click counter service
//!
//! Create-or-increment and aggregation semantics on top of a [`StatStore`].
//! The store is injected; nothing here touches global state.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::{CalclickError, Result};
use crate::storage::{CalendarStat, Event, Platform, PlatformCounts, StatKey, StatStore};

/// 事件 id 最大长度（与表结构一致）
pub const MAX_EVENT_ID_LEN: usize = 255;

// ============ Request/Response DTOs ============

/// Request to explicitly create (or rename) an event
#[derive(Debug, Clone, Default)]
pub struct CreateEventRequest {
    pub id: String,
    /// Display name, defaults to the id
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Counts of one event, either for both platforms or a single one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EventCounts {
    All {
        #[serde(rename = "eventId")]
        event_id: String,
        counts: PlatformCounts,
    },
    Single {
        #[serde(rename = "eventId")]
        event_id: String,
        platform: Platform,
        count: i64,
    },
}

/// An event together with its counter rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetail {
    pub event: Event,
    pub stats: Vec<CalendarStat>,
}

// ============ Validation helpers ============

/// 校验事件 id：去掉首尾空白后非空，且不超过最大长度
pub fn validate_event_id(event_id: &str) -> Result<&str> {
    let trimmed = event_id.trim();
    if trimmed.is_empty() {
        return Err(CalclickError::validation("event id is required"));
    }
    if trimmed.chars().count() > MAX_EVENT_ID_LEN {
        return Err(CalclickError::validation(format!(
            "event id must be at most {} characters",
            MAX_EVENT_ID_LEN
        )));
    }
    Ok(trimmed)
}

/// 解析点击请求中的平台，缺失或未知值都是校验错误
pub fn parse_platform(platform: Option<&str>) -> Result<Platform> {
    platform
        .and_then(|p| p.parse::<Platform>().ok())
        .ok_or_else(|| {
            CalclickError::validation(format!(
                "platform must be {}",
                Platform::variants().join(" or ")
            ))
        })
}

// ============ CounterService Implementation ============

pub struct CounterService {
    store: Arc<dyn StatStore>,
}

impl CounterService {
    pub fn new(store: Arc<dyn StatStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn StatStore> {
        &self.store
    }

    /// Record one click for `(event_id, platform)`
    ///
    /// Validation happens before any storage access. The event row is created
    /// on first click (name = id), then the counter is created with 1 or
    /// incremented atomically.
    pub async fn record_click(&self, event_id: &str, platform: Option<&str>) -> Result<CalendarStat> {
        let platform = parse_platform(platform)?;
        let event_id = validate_event_id(event_id)?;

        self.store.ensure_event(&Event::minimal(event_id)).await?;

        let stat = self
            .store
            .upsert_and_increment(&StatKey::new(event_id, platform), 1)
            .await?;

        debug!(
            "Click recorded: event={}, platform={}, count={}",
            stat.event_id, stat.platform, stat.count
        );
        Ok(stat)
    }

    /// All counter rows of an event, verbatim; unknown event gives an empty list
    pub async fn stats_for_event(&self, event_id: &str) -> Result<Vec<CalendarStat>> {
        self.store.stats_for_event(event_id.trim()).await
    }

    /// Per-platform totals of an event
    ///
    /// An unknown or invalid `platform` filter is ignored and both totals are
    /// returned.
    pub async fn counts_for_event(
        &self,
        event_id: &str,
        platform: Option<&str>,
    ) -> Result<EventCounts> {
        let event_id = event_id.trim();
        let stats = self.store.stats_for_event(event_id).await?;
        let counts = PlatformCounts::from_stats(&stats);

        match platform.and_then(|p| p.parse::<Platform>().ok()) {
            Some(platform) => Ok(EventCounts::Single {
                event_id: event_id.to_string(),
                platform,
                count: counts.get(platform),
            }),
            None => Ok(EventCounts::All {
                event_id: event_id.to_string(),
                counts,
            }),
        }
    }

    /// Per-platform totals across every event
    pub async fn global_counts(&self) -> Result<PlatformCounts> {
        let stats = self.store.all_stats().await?;
        Ok(PlatformCounts::from_stats(&stats))
    }

    /// Create an event, or replace name/description of an existing one
    pub async fn create_event(&self, req: CreateEventRequest) -> Result<Event> {
        let id = validate_event_id(&req.id)?.to_string();
        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| id.clone());
        let description = req.description.filter(|d| !d.trim().is_empty());

        let event = self
            .store
            .upsert_event(&Event {
                id,
                name,
                description,
            })
            .await?;

        info!("Event saved: {} ({})", event.id, event.name);
        Ok(event)
    }

    /// Event with its counter rows, `NotFound` when the event does not exist
    pub async fn get_event(&self, event_id: &str) -> Result<EventDetail> {
        let event_id = validate_event_id(event_id)?;
        let event = self
            .store
            .get_event(event_id)
            .await?
            .ok_or_else(|| CalclickError::not_found(format!("event not found: {}", event_id)))?;
        let stats = self.store.stats_for_event(event_id).await?;

        Ok(EventDetail { event, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_event_id() {
        assert_eq!(validate_event_id(" fest ").unwrap(), "fest");
        assert!(matches!(
            validate_event_id("   "),
            Err(CalclickError::Validation(_))
        ));
        assert!(validate_event_id(&"a".repeat(MAX_EVENT_ID_LEN)).is_ok());
        assert!(validate_event_id(&"a".repeat(MAX_EVENT_ID_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_platform_rejects_missing_and_unknown() {
        assert_eq!(parse_platform(Some("google")).unwrap(), Platform::Google);
        assert_eq!(parse_platform(Some("apple")).unwrap(), Platform::Apple);

        let err = parse_platform(Some("other")).unwrap_err();
        assert_eq!(err.message(), "platform must be google or apple");
        assert!(parse_platform(None).is_err());
        assert!(parse_platform(Some("APPLE")).is_err());
    }

    #[test]
    fn test_event_counts_serialization() {
        let all = EventCounts::All {
            event_id: "fest".to_string(),
            counts: PlatformCounts { google: 1, apple: 2 },
        };
        assert_eq!(
            serde_json::to_value(&all).unwrap(),
            serde_json::json!({ "eventId": "fest", "counts": { "google": 1, "apple": 2 } })
        );

        let single = EventCounts::Single {
            event_id: "fest".to_string(),
            platform: Platform::Google,
            count: 3,
        };
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            serde_json::json!({ "eventId": "fest", "platform": "google", "count": 3 })
        );
    }
}
