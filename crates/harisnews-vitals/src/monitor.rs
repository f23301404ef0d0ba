//! 페이지 뷰 성능 모니터.
//!
//! 페이지 뷰마다 하나씩 생성되는 컨텍스트 객체. 수집기 한 세트를
//! 여러 소비자(push 리스너, pull 조회)가 공유하며, 마지막 핸들이
//! 해제될 때 관찰자를 전부 정리한다.

use harisnews_core::error::CoreError;
use harisnews_core::models::metrics::PerformanceMetrics;
use harisnews_core::ports::performance::PerformanceEntrySource;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::aggregator::{ListenerId, MetricAggregator, MetricsListener};
use crate::collector::MetricCollector;

#[derive(Debug, Default)]
struct ConsumerState {
    consumers: usize,
    torn_down: bool,
}

/// Web Vitals 모니터
pub struct VitalsMonitor {
    aggregator: Arc<MetricAggregator>,
    collector: MetricCollector,
    state: Mutex<ConsumerState>,
}

impl VitalsMonitor {
    /// 공급원에 관찰자를 등록하고 모니터링 시작
    pub fn start(source: Arc<dyn PerformanceEntrySource>, session_gap_ms: f64) -> Arc<Self> {
        let aggregator = Arc::new(MetricAggregator::new());
        let collector = MetricCollector::new(source, Arc::clone(&aggregator), session_gap_ms);
        collector.start();

        Arc::new(Self {
            aggregator,
            collector,
            state: Mutex::new(ConsumerState::default()),
        })
    }

    /// push 소비자 등록: 스냅샷이 바뀔 때마다 리스너 호출
    pub fn subscribe(self: &Arc<Self>, listener: MetricsListener) -> Result<MonitorHandle, CoreError> {
        self.add_consumer()?;
        let id = self.aggregator.subscribe(listener);
        Ok(MonitorHandle {
            monitor: Arc::clone(self),
            listener: Some(id),
            released: false,
        })
    }

    /// pull 소비자 등록
    pub fn acquire(self: &Arc<Self>) -> Result<MonitorHandle, CoreError> {
        self.add_consumer()?;
        Ok(MonitorHandle {
            monitor: Arc::clone(self),
            listener: None,
            released: false,
        })
    }

    /// 최신 스냅샷
    pub fn snapshot(&self) -> PerformanceMetrics {
        self.aggregator.snapshot()
    }

    /// 현재 소비자 수
    pub fn consumer_count(&self) -> usize {
        self.state.lock().consumers
    }

    /// 관찰자가 정리되었는지
    pub fn is_torn_down(&self) -> bool {
        self.state.lock().torn_down
    }

    fn add_consumer(&self) -> Result<(), CoreError> {
        let mut state = self.state.lock();
        if state.torn_down {
            return Err(CoreError::Internal(
                "이미 종료된 모니터에는 소비자를 추가할 수 없습니다".to_string(),
            ));
        }
        state.consumers += 1;
        Ok(())
    }

    fn release_consumer(&self, listener: Option<ListenerId>) {
        if let Some(id) = listener {
            self.aggregator.unsubscribe(id);
        }

        let last = {
            let mut state = self.state.lock();
            state.consumers = state.consumers.saturating_sub(1);
            if state.consumers == 0 && !state.torn_down {
                state.torn_down = true;
                true
            } else {
                false
            }
        };

        if last {
            self.collector.stop();
            info!("마지막 소비자 해제, 성능 관찰 종료");
        } else {
            debug!("소비자 해제, 남은 소비자 있음");
        }
    }
}

/// 모니터 소비자 핸들
///
/// `release()` 또는 drop 시 소비자 하나가 해제된다.
pub struct MonitorHandle {
    monitor: Arc<VitalsMonitor>,
    listener: Option<ListenerId>,
    released: bool,
}

impl MonitorHandle {
    /// 최신 스냅샷 (pull)
    pub fn snapshot(&self) -> PerformanceMetrics {
        self.monitor.snapshot()
    }

    /// 공유 모니터
    pub fn monitor(&self) -> &Arc<VitalsMonitor> {
        &self.monitor
    }

    /// 명시적 해제
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.monitor.release_consumer(self.listener.take());
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl std::fmt::Debug for MonitorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MonitorHandle")
            .field("listener", &self.listener)
            .field("released", &self.released)
            .finish()
    }
}
