//! CounterService tests
//!
//! Every scenario runs against both the SQLite store and the in-memory store.

use std::sync::Arc;

use calclick::config::DatabaseConfig;
use calclick::errors::CalclickError;
use calclick::services::{CounterService, CreateEventRequest, EventCounts};
use calclick::storage::{MemoryStore, Platform, PlatformCounts, SeaOrmStorage, StatStore};
use tempfile::TempDir;

// =============================================================================
// Test Setup
// =============================================================================

/// The TempDir must outlive the store
struct Fixture {
    service: Arc<CounterService>,
    store: Arc<dyn StatStore>,
    _dir: Option<TempDir>,
}

async fn sqlite_fixture() -> Fixture {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("counter_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, &DatabaseConfig::default())
        .await
        .expect("Failed to create SQLite storage");
    let store: Arc<dyn StatStore> = Arc::new(storage);

    Fixture {
        service: Arc::new(CounterService::new(store.clone())),
        store,
        _dir: Some(dir),
    }
}

fn memory_fixture() -> Fixture {
    let store: Arc<dyn StatStore> = Arc::new(MemoryStore::new());
    Fixture {
        service: Arc::new(CounterService::new(store.clone())),
        store,
        _dir: None,
    }
}

async fn fixtures() -> Vec<(&'static str, Fixture)> {
    vec![("sqlite", sqlite_fixture().await), ("memory", memory_fixture())]
}

// =============================================================================
// recordClick
// =============================================================================

#[tokio::test]
async fn test_sequential_clicks_count_up() {
    for (name, fx) in fixtures().await {
        for i in 1..=5 {
            let stat = fx
                .service
                .record_click("fest", Some("google"))
                .await
                .unwrap();
            assert_eq!(stat.count, i, "backend {}", name);
            assert_eq!(stat.platform, "google");
            assert_eq!(stat.event_id, "fest");
        }

        let stats = fx.service.stats_for_event("fest").await.unwrap();
        assert_eq!(stats.len(), 1, "backend {}", name);
        assert_eq!(stats[0].count, 5, "backend {}", name);
    }
}

#[tokio::test]
async fn test_concurrent_clicks_are_not_lost() {
    const CLICKS: i64 = 20;

    for (name, fx) in fixtures().await {
        let mut handles = Vec::new();
        for _ in 0..CLICKS {
            let service = fx.service.clone();
            handles.push(tokio::spawn(async move {
                service.record_click("rush", Some("apple")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let counts = fx.service.counts_for_event("rush", None).await.unwrap();
        assert_eq!(
            counts,
            EventCounts::All {
                event_id: "rush".to_string(),
                counts: PlatformCounts {
                    google: 0,
                    apple: CLICKS
                },
            },
            "backend {}",
            name
        );
    }
}

#[tokio::test]
async fn test_invalid_platform_writes_nothing() {
    for (name, fx) in fixtures().await {
        for platform in [Some("other"), None, Some("Google"), Some("")] {
            let err = fx
                .service
                .record_click("fest", platform)
                .await
                .unwrap_err();
            assert!(
                matches!(err, CalclickError::Validation(_)),
                "backend {}",
                name
            );
        }

        assert!(fx.store.get_event("fest").await.unwrap().is_none());
        assert!(fx.store.all_stats().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_blank_event_id_rejected() {
    for (_, fx) in fixtures().await {
        let err = fx
            .service
            .record_click("   ", Some("google"))
            .await
            .unwrap_err();
        assert!(matches!(err, CalclickError::Validation(_)));
        assert!(fx.store.all_stats().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_first_click_creates_event_named_after_id() {
    for (name, fx) in fixtures().await {
        fx.service
            .record_click("lumenfest-2025", Some("apple"))
            .await
            .unwrap();

        let event = fx.store.get_event("lumenfest-2025").await.unwrap().unwrap();
        assert_eq!(event.name, "lumenfest-2025", "backend {}", name);
        assert!(event.description.is_none());
    }
}

// =============================================================================
// Aggregation
// =============================================================================

#[tokio::test]
async fn test_counts_for_event_without_clicks_are_zero() {
    for (_, fx) in fixtures().await {
        let counts = fx.service.counts_for_event("quiet", None).await.unwrap();
        assert_eq!(
            counts,
            EventCounts::All {
                event_id: "quiet".to_string(),
                counts: PlatformCounts::default(),
            }
        );
    }
}

#[tokio::test]
async fn test_counts_platform_filter() {
    for (name, fx) in fixtures().await {
        for _ in 0..3 {
            fx.service.record_click("fest", Some("google")).await.unwrap();
        }
        for _ in 0..5 {
            fx.service.record_click("fest", Some("apple")).await.unwrap();
        }

        let google = fx
            .service
            .counts_for_event("fest", Some("google"))
            .await
            .unwrap();
        assert_eq!(
            google,
            EventCounts::Single {
                event_id: "fest".to_string(),
                platform: Platform::Google,
                count: 3,
            },
            "backend {}",
            name
        );

        // 无效过滤值按未指定处理
        let unfiltered = fx
            .service
            .counts_for_event("fest", Some("outlook"))
            .await
            .unwrap();
        assert_eq!(
            unfiltered,
            EventCounts::All {
                event_id: "fest".to_string(),
                counts: PlatformCounts { google: 3, apple: 5 },
            }
        );
    }
}

#[tokio::test]
async fn test_global_counts_sum_all_events() {
    for (name, fx) in fixtures().await {
        for _ in 0..2 {
            fx.service.record_click("a", Some("google")).await.unwrap();
        }
        fx.service.record_click("b", Some("google")).await.unwrap();
        for _ in 0..4 {
            fx.service.record_click("b", Some("apple")).await.unwrap();
        }

        let counts = fx.service.global_counts().await.unwrap();
        assert_eq!(counts, PlatformCounts { google: 3, apple: 4 }, "backend {}", name);
    }
}

#[tokio::test]
async fn test_global_counts_empty_store() {
    for (_, fx) in fixtures().await {
        assert_eq!(
            fx.service.global_counts().await.unwrap(),
            PlatformCounts::default()
        );
    }
}

#[tokio::test]
async fn test_stats_for_unknown_event_is_empty() {
    for (_, fx) in fixtures().await {
        assert!(fx.service.stats_for_event("nope").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_unknown_platform_rows_are_listed_but_not_summed() {
    let store = MemoryStore::new();
    store.insert_raw("legacy", "outlook", 7);
    store.insert_raw("legacy", "google", 2);
    let service = CounterService::new(Arc::new(store));

    let stats = service.stats_for_event("legacy").await.unwrap();
    assert_eq!(stats.len(), 2);
    assert!(stats.iter().any(|s| s.platform == "outlook" && s.count == 7));

    assert_eq!(
        service.global_counts().await.unwrap(),
        PlatformCounts { google: 2, apple: 0 }
    );
}

// =============================================================================
// Events
// =============================================================================

#[tokio::test]
async fn test_create_and_get_event() {
    for (name, fx) in fixtures().await {
        let event = fx
            .service
            .create_event(CreateEventRequest {
                id: "fest".to_string(),
                name: Some("LümenFest 2025".to_string()),
                description: Some("Open air".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(event.name, "LümenFest 2025", "backend {}", name);

        fx.service.record_click("fest", Some("google")).await.unwrap();

        let detail = fx.service.get_event("fest").await.unwrap();
        assert_eq!(detail.event.name, "LümenFest 2025");
        assert_eq!(detail.event.description.as_deref(), Some("Open air"));
        assert_eq!(detail.stats.len(), 1);
        assert_eq!(detail.stats[0].count, 1);
    }
}

#[tokio::test]
async fn test_create_event_renames_auto_created_event() {
    for (_, fx) in fixtures().await {
        fx.service.record_click("fest", Some("apple")).await.unwrap();

        let event = fx
            .service
            .create_event(CreateEventRequest {
                id: "fest".to_string(),
                name: Some("Renamed".to_string()),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(event.name, "Renamed");

        // 计数不受影响
        let stats = fx.service.stats_for_event("fest").await.unwrap();
        assert_eq!(stats[0].count, 1);
    }
}

#[tokio::test]
async fn test_create_event_name_defaults_to_id() {
    for (_, fx) in fixtures().await {
        let event = fx
            .service
            .create_event(CreateEventRequest {
                id: "plain".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(event.name, "plain");
    }
}

#[tokio::test]
async fn test_get_missing_event_is_not_found() {
    for (_, fx) in fixtures().await {
        let err = fx.service.get_event("ghost").await.unwrap_err();
        assert!(matches!(err, CalclickError::NotFound(_)));
    }
}

#[tokio::test]
async fn test_click_after_create_keeps_name() {
    for (_, fx) in fixtures().await {
        fx.service
            .create_event(CreateEventRequest {
                id: "fest".to_string(),
                name: Some("Named".to_string()),
                description: None,
            })
            .await
            .unwrap();
        fx.service.record_click("fest", Some("google")).await.unwrap();

        let event = fx.store.get_event("fest").await.unwrap().unwrap();
        assert_eq!(event.name, "Named");
    }
}
