//! Web Vitals 파이프라인 통합 테스트.
//!
//! 엔트리 공급원 → 수집기 → 집계기 → 모니터 → 점수/권고.

use harisnews_core::models::metrics::PerformanceMetrics;
use harisnews_core::models::report::{Priority, ScoreCategory};
use harisnews_vitals::advisor::PERFORMING_WELL_TITLE;
use harisnews_vitals::{presenter, scorer, BufferedEntrySource, VitalsMonitor};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn start() -> (Arc<BufferedEntrySource>, Arc<VitalsMonitor>) {
    let source = Arc::new(BufferedEntrySource::new());
    let monitor = VitalsMonitor::start(source.clone(), 1_000.0);
    (source, monitor)
}

#[test]
fn excellent_page_load() {
    let (source, monitor) = start();
    let handle = monitor.acquire().unwrap();

    source.dispatch(vec![
        json!({"entryType": "navigation", "responseStart": 150}),
        json!({"entryType": "paint", "name": "first-contentful-paint", "startTime": 1200}),
        json!({"entryType": "largest-contentful-paint", "startTime": 1800}),
        json!({"entryType": "largest-contentful-paint", "startTime": 2000}),
        json!({"entryType": "first-input", "startTime": 4000, "processingStart": 4050}),
        json!({"entryType": "layout-shift", "startTime": 300, "value": 0.05}),
    ]);

    let snapshot = handle.snapshot();
    assert_eq!(
        snapshot,
        PerformanceMetrics {
            ttfb: Some(150.0),
            fcp: Some(1200.0),
            lcp: Some(2000.0),
            fid: Some(50.0),
            cls: Some(0.05),
        }
    );

    let report = scorer::analyze(&snapshot);
    assert_eq!(report.score, 100);
    assert_eq!(report.category, ScoreCategory::Excellent);
    assert_eq!(report.recommendations.len(), 1);
    assert_eq!(report.recommendations[0].title, PERFORMING_WELL_TITLE);
    assert_eq!(report.recommendations[0].priority, Priority::Low);
}

#[test]
fn cls_session_windows_through_monitor() {
    let (source, monitor) = start();
    let _handle = monitor.acquire().unwrap();

    source.dispatch(vec![
        json!({"entryType": "layout-shift", "startTime": 0, "value": 0.05}),
        json!({"entryType": "layout-shift", "startTime": 500, "value": 0.05}),
    ]);
    assert!((monitor.snapshot().cls.unwrap() - 0.1).abs() < 1e-9);

    // 1초 넘게 떨어진 이동은 새 세션
    source.dispatch(vec![json!({"entryType": "layout-shift", "startTime": 2000, "value": 0.2})]);
    assert!((monitor.snapshot().cls.unwrap() - 0.2).abs() < 1e-9);

    // 사용자 입력 직후 이동은 제외
    source.dispatch(vec![json!({
        "entryType": "layout-shift", "startTime": 2100, "value": 0.5, "hadRecentInput": true
    })]);
    assert!((monitor.snapshot().cls.unwrap() - 0.2).abs() < 1e-9);
}

#[test]
fn late_subscriber_sees_buffered_history() {
    let source = Arc::new(BufferedEntrySource::new());
    // 모니터 시작 전에 도착한 엔트리도 buffered 관찰로 반영된다
    source.dispatch(vec![
        json!({"entryType": "paint", "name": "first-contentful-paint", "startTime": 640}),
        json!({"entryType": "largest-contentful-paint", "startTime": 1500}),
    ]);

    let monitor = VitalsMonitor::start(source.clone(), 1_000.0);
    let snapshot = monitor.snapshot();
    assert_eq!(snapshot.fcp, Some(640.0));
    assert_eq!(snapshot.lcp, Some(1500.0));
}

#[test]
fn push_and_pull_consumers_share_one_collector() {
    let (source, monitor) = start();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);
    let push = monitor
        .subscribe(Arc::new(move |m: &PerformanceMetrics| {
            sink.lock().unwrap().push(m.lcp)
        }))
        .unwrap();
    let pull = monitor.acquire().unwrap();
    let observers = source.observer_count();

    source.dispatch(vec![json!({"entryType": "largest-contentful-paint", "startTime": 3100})]);
    assert_eq!(received.lock().unwrap().last().copied(), Some(Some(3100.0)));
    assert_eq!(pull.snapshot().lcp, Some(3100.0));
    // 소비자가 늘어도 관찰자는 한 세트
    assert_eq!(source.observer_count(), observers);

    push.release();
    drop(pull);
    assert!(monitor.is_torn_down());
    assert_eq!(source.observer_count(), 0);
}

#[test]
fn poor_page_load_report() {
    let (source, monitor) = start();
    let _handle = monitor.acquire().unwrap();
    source.dispatch(vec![
        json!({"entryType": "navigation", "responseStart": 900}),
        json!({"entryType": "paint", "name": "first-contentful-paint", "startTime": 3500}),
        json!({"entryType": "largest-contentful-paint", "startTime": 5000}),
        json!({"entryType": "first-input", "startTime": 1000, "processingStart": 1350}),
        json!({"entryType": "layout-shift", "startTime": 100, "value": 0.3}),
    ]);

    let view = presenter::present(&monitor.snapshot());
    assert_eq!(view.report.score, 35);
    assert_eq!(view.summary.category, ScoreCategory::Poor);
    assert_eq!(view.report.recommendations.len(), 5);
    assert!(view
        .report
        .recommendations
        .iter()
        .all(|r| r.priority == Priority::High));
}
