//! 计数汇总与点击写入基准测试

use std::hint::black_box;
use std::sync::Arc;

use calclick::api::extract::event_id_from_path;
use calclick::services::CounterService;
use calclick::storage::{CalendarStat, MemoryStore, PlatformCounts};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn make_stats(events: usize) -> Vec<CalendarStat> {
    (0..events)
        .flat_map(|i| {
            ["google", "apple", "outlook"]
                .into_iter()
                .map(move |platform| CalendarStat {
                    event_id: format!("event-{}", i),
                    platform: platform.to_string(),
                    count: (i % 97) as i64,
                })
        })
        .collect()
}

// ============== PlatformCounts::from_stats ==============

fn bench_from_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("counts/from_stats");

    for events in [10usize, 1_000, 50_000] {
        let stats = make_stats(events);
        group.bench_with_input(BenchmarkId::from_parameter(events), &stats, |b, stats| {
            b.iter(|| PlatformCounts::from_stats(black_box(stats)));
        });
    }

    group.finish();
}

// ============== record_click (memory store) ==============

fn bench_record_click(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let service = CounterService::new(Arc::new(MemoryStore::new()));

    c.bench_function("counts/record_click_memory", |b| {
        b.to_async(&rt).iter(|| async {
            service
                .record_click(black_box("bench-event"), Some("google"))
                .await
                .unwrap()
        });
    });
}

// ============== event id path fallback ==============

fn bench_event_id_from_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("counts/event_id_from_path");

    group.bench_function("plain", |b| {
        b.iter(|| event_id_from_path(black_box("/events/fest-2025/click")));
    });

    group.bench_function("percent_encoded", |b| {
        b.iter(|| event_id_from_path(black_box("/api/events/L%C3%BCmen%20Fest/counts")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_from_stats,
    bench_record_click,
    bench_event_id_from_path
);
criterion_main!(benches);
