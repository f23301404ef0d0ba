//! Web Vitals 수집기.
//!
//! 엔트리 공급원에 관찰자를 등록하고, 수신한 원시 엔트리를 디코딩해
//! 집계기에 부분 갱신으로 전달한다. 계측 미지원은 에러가 아니라
//! 해당 지표만 미측정으로 남는 상황으로 취급한다.

use harisnews_core::error::CoreError;
use harisnews_core::models::entry::{EntryType, PerformanceEntry, FIRST_CONTENTFUL_PAINT};
use harisnews_core::models::metrics::{MetricKind, MetricPatch};
use harisnews_core::ports::performance::{
    EntryCallback, ObserverFlow, ObserverId, PerformanceEntrySource,
};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::aggregator::MetricAggregator;
use crate::layout_shift::LayoutShiftWindow;

/// 메트릭 수집기
pub struct MetricCollector {
    source: Arc<dyn PerformanceEntrySource>,
    aggregator: Arc<MetricAggregator>,
    session_gap_ms: f64,
    observers: Mutex<Vec<ObserverId>>,
}

impl MetricCollector {
    /// 수집기 생성 (관찰 시작 전)
    pub fn new(
        source: Arc<dyn PerformanceEntrySource>,
        aggregator: Arc<MetricAggregator>,
        session_gap_ms: f64,
    ) -> Self {
        Self {
            source,
            aggregator,
            session_gap_ms,
            observers: Mutex::new(Vec::new()),
        }
    }

    /// 다섯 지표 관찰 전부 시작
    pub fn start(&self) {
        self.start_ttfb();
        self.observe_fcp();
        self.observe_lcp();
        self.observe_fid();
        self.observe_cls();
        debug!("성능 관찰 시작: 관찰자 {}개", self.observers.lock().len());
    }

    /// 내비게이션 엔트리에서 TTFB 측정
    ///
    /// 아직 내비게이션 엔트리가 없거나 기록된 엔트리가 잘못된 경우
    /// navigation 유형을 관찰해 도착 시 반영한다.
    pub fn start_ttfb(&self) {
        if let Some(raw) = self.source.navigation_entry() {
            match PerformanceEntry::decode(&raw) {
                Ok(PerformanceEntry::Navigation { response_start }) => {
                    self.aggregator
                        .update(MetricPatch::single(MetricKind::Ttfb, response_start));
                    return;
                }
                Ok(other) => warn!("내비게이션이 아닌 엔트리 무시: {}", other.entry_type()),
                Err(e) => warn!("내비게이션 엔트리 디코딩 실패: {e}"),
            }
        }

        let aggregator = Arc::clone(&self.aggregator);
        self.register(
            MetricKind::Ttfb,
            EntryType::Navigation,
            Box::new(move |batch: &[Value]| {
                for entry in decode_batch(batch, EntryType::Navigation) {
                    if let PerformanceEntry::Navigation { response_start } = entry {
                        aggregator.update(MetricPatch::single(MetricKind::Ttfb, response_start));
                        return ObserverFlow::Disconnect;
                    }
                }
                ObserverFlow::Continue
            }),
        );
    }

    /// FCP 관찰: 첫 `first-contentful-paint` 엔트리 후 해제
    pub fn observe_fcp(&self) -> bool {
        let aggregator = Arc::clone(&self.aggregator);
        self.register(
            MetricKind::Fcp,
            EntryType::Paint,
            Box::new(move |batch: &[Value]| {
                for entry in decode_batch(batch, EntryType::Paint) {
                    if let PerformanceEntry::Paint { name, start_time } = entry {
                        if name == FIRST_CONTENTFUL_PAINT {
                            aggregator.update(MetricPatch::single(MetricKind::Fcp, start_time));
                            return ObserverFlow::Disconnect;
                        }
                    }
                }
                ObserverFlow::Continue
            }),
        )
    }

    /// LCP 관찰: 후보가 올 때마다 최신 값으로 덮어쓴다
    pub fn observe_lcp(&self) -> bool {
        let aggregator = Arc::clone(&self.aggregator);
        self.register(
            MetricKind::Lcp,
            EntryType::LargestContentfulPaint,
            Box::new(move |batch: &[Value]| {
                for entry in decode_batch(batch, EntryType::LargestContentfulPaint) {
                    if let PerformanceEntry::LargestContentfulPaint { start_time } = entry {
                        aggregator.update(MetricPatch::single(MetricKind::Lcp, start_time));
                    }
                }
                ObserverFlow::Continue
            }),
        )
    }

    /// FID 관찰: 첫 입력의 처리 지연 후 해제
    pub fn observe_fid(&self) -> bool {
        let aggregator = Arc::clone(&self.aggregator);
        self.register(
            MetricKind::Fid,
            EntryType::FirstInput,
            Box::new(move |batch: &[Value]| {
                for entry in decode_batch(batch, EntryType::FirstInput) {
                    if let PerformanceEntry::FirstInput {
                        start_time,
                        processing_start,
                    } = entry
                    {
                        let delay = (processing_start - start_time).max(0.0);
                        aggregator.update(MetricPatch::single(MetricKind::Fid, delay));
                        return ObserverFlow::Disconnect;
                    }
                }
                ObserverFlow::Continue
            }),
        )
    }

    /// CLS 관찰: 세션 윈도우 최댓값이 커질 때마다 갱신
    pub fn observe_cls(&self) -> bool {
        let aggregator = Arc::clone(&self.aggregator);
        let mut window = LayoutShiftWindow::new(self.session_gap_ms);
        self.register(
            MetricKind::Cls,
            EntryType::LayoutShift,
            Box::new(move |batch: &[Value]| {
                for entry in decode_batch(batch, EntryType::LayoutShift) {
                    if let PerformanceEntry::LayoutShift {
                        start_time,
                        value,
                        had_recent_input,
                    } = entry
                    {
                        if let Some(max) = window.record(start_time, value, had_recent_input) {
                            aggregator.update(MetricPatch::single(MetricKind::Cls, max));
                        }
                    }
                }
                ObserverFlow::Continue
            }),
        )
    }

    /// 등록된 관찰자 전부 해제
    pub fn stop(&self) {
        let observers: Vec<ObserverId> = std::mem::take(&mut *self.observers.lock());
        for id in &observers {
            self.source.disconnect(*id);
        }
        debug!("성능 관찰 중지: 관찰자 {}개 해제", observers.len());
    }

    /// 이 수집기가 등록한 관찰자 수 (공급원이 스스로 해제한 것 포함)
    pub fn registered_observers(&self) -> usize {
        self.observers.lock().len()
    }

    fn register(&self, metric: MetricKind, entry_type: EntryType, callback: EntryCallback) -> bool {
        match self.source.observe(entry_type, true, callback) {
            Ok(id) => {
                self.observers.lock().push(id);
                true
            }
            Err(CoreError::Unsupported(reason)) => {
                warn!("{metric} 측정 불가, 미측정으로 유지: {reason}");
                false
            }
            Err(e) => {
                warn!("{metric} 관찰자 등록 실패: {e}");
                false
            }
        }
    }
}

/// 원시 배치 디코딩: 형식이 잘못되었거나 유형이 다른 엔트리는 버린다
fn decode_batch(batch: &[Value], expected: EntryType) -> Vec<PerformanceEntry> {
    batch
        .iter()
        .filter_map(|raw| match PerformanceEntry::decode(raw) {
            Ok(entry) if entry.entry_type() == expected => Some(entry),
            Ok(entry) => {
                debug!("{expected} 관찰자에 {} 엔트리 수신, 무시", entry.entry_type());
                None
            }
            Err(e) => {
                warn!("잘못된 {expected} 엔트리 무시: {e}");
                None
            }
        })
        .collect()
}
