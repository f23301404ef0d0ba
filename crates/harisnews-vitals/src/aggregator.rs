//! 메트릭 집계기.
//!
//! 페이지 뷰 하나의 `PerformanceMetrics` 스냅샷을 보관하고,
//! 갱신될 때마다 등록된 리스너 전원에게 전체 스냅샷을 전달한다.

use harisnews_core::models::metrics::{MetricPatch, PerformanceMetrics};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::trace;

/// 스냅샷 리스너
pub type MetricsListener = Arc<dyn Fn(&PerformanceMetrics) + Send + Sync>;

/// 리스너 등록 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// 메트릭 집계기
///
/// 리스너는 내부 잠금을 해제한 뒤 호출되므로 리스너 안에서
/// `snapshot()`/`unsubscribe()`를 다시 호출해도 된다.
pub struct MetricAggregator {
    snapshot: Mutex<PerformanceMetrics>,
    listeners: Mutex<Vec<(ListenerId, MetricsListener)>>,
    next_id: AtomicU64,
}

impl MetricAggregator {
    /// 빈 스냅샷으로 생성
    pub fn new() -> Self {
        Self {
            snapshot: Mutex::new(PerformanceMetrics::default()),
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// 부분 갱신 병합 후 전체 스냅샷 전달
    ///
    /// 중간 값을 합치지 않고 호출마다 한 번씩 전달한다.
    pub fn update(&self, patch: MetricPatch) -> PerformanceMetrics {
        let merged = {
            let mut snapshot = self.snapshot.lock();
            snapshot.apply(&patch);
            *snapshot
        };
        trace!("메트릭 갱신: {:?}", merged);

        let listeners: Vec<MetricsListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&merged);
        }

        merged
    }

    /// 리스너 등록
    pub fn subscribe(&self, listener: MetricsListener) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.lock().push((id, listener));
        id
    }

    /// 리스너 해제 (해제됐으면 true)
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// 현재 스냅샷 (복사본)
    pub fn snapshot(&self) -> PerformanceMetrics {
        *self.snapshot.lock()
    }

    /// 등록된 리스너 수
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().len()
    }
}

impl Default for MetricAggregator {
    fn default() -> Self {
        Self::new()
    }
}
