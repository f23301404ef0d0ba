//! 페이지 뷰 레지스트리.
//!
//! 비컨으로 생성된 페이지 뷰마다 엔트리 공급원과 [`VitalsMonitor`]를 하나씩
//! 보관한다. 레지스트리 자신도 pull 소비자 핸들을 하나 들고 있으며,
//! 삭제나 축출 시 이 핸들을 해제한다. SSE 구독 같은 다른 소비자가 남아 있으면
//! 모니터는 마지막 소비자가 떠날 때 정리된다.

use chrono::{DateTime, Utc};
use harisnews_core::config::VitalsConfig;
use harisnews_core::error::CoreError;
use harisnews_core::models::entry::EntryType;
use harisnews_core::models::metrics::PerformanceMetrics;
use harisnews_vitals::aggregator::MetricsListener;
use harisnews_vitals::source::DispatchSummary;
use harisnews_vitals::{BufferedEntrySource, MonitorHandle, VitalsMonitor};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 페이지 뷰 하나
pub struct PageView {
    id: String,
    created_at: DateTime<Utc>,
    source: Arc<BufferedEntrySource>,
    monitor: Arc<VitalsMonitor>,
    handle: Mutex<Option<MonitorHandle>>,
}

impl PageView {
    /// 뷰 ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 생성 시각
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 공유 모니터
    pub fn monitor(&self) -> &Arc<VitalsMonitor> {
        &self.monitor
    }

    /// 최신 스냅샷
    pub fn snapshot(&self) -> PerformanceMetrics {
        self.monitor.snapshot()
    }

    /// push 리스너 등록
    ///
    /// 조회 직후 삭제나 축출로 모니터가 이미 정리됐다면 삭제된 뷰와 같이 NotFound.
    pub fn subscribe(&self, listener: MetricsListener) -> Result<MonitorHandle, CoreError> {
        self.monitor.subscribe(listener).map_err(|e| {
            if self.monitor.is_torn_down() {
                CoreError::not_found("PageView", self.id.as_str())
            } else {
                e
            }
        })
    }

    /// 비컨 엔트리 전달
    ///
    /// 내비게이션 엔트리는 배치 맨 앞에 넣어 TTFB 관찰자가 먼저 받게 한다.
    pub fn ingest(&self, navigation: Option<Value>, mut entries: Vec<Value>) -> DispatchSummary {
        if let Some(nav) = navigation {
            entries.insert(0, nav);
        }
        self.source.dispatch(entries)
    }

    /// 레지스트리 핸들 해제 (중복 호출 무시)
    fn close(&self) {
        if let Some(handle) = self.handle.lock().take() {
            handle.release();
        }
    }
}

/// 페이지 뷰 목록 (생성 순서)
pub struct PageViewRegistry {
    config: VitalsConfig,
    views: Mutex<VecDeque<Arc<PageView>>>,
}

impl PageViewRegistry {
    /// 새 레지스트리
    pub fn new(config: VitalsConfig) -> Self {
        Self {
            config,
            views: Mutex::new(VecDeque::new()),
        }
    }

    /// 페이지 뷰 생성 후 모니터링 시작
    ///
    /// `supported`로 클라이언트가 관찰할 수 있는 엔트리 유형을 제한할 수 있다.
    /// 모니터링이 꺼져 있으면 어떤 유형도 지원하지 않는 공급원을 쓴다.
    /// 최대 개수를 넘으면 가장 오래된 뷰를 축출한다.
    pub fn create(
        &self,
        navigation: Option<Value>,
        supported: Option<Vec<EntryType>>,
    ) -> Result<Arc<PageView>, CoreError> {
        let source = Arc::new(match supported {
            _ if !self.config.enabled => BufferedEntrySource::with_supported(std::iter::empty()),
            Some(types) => BufferedEntrySource::with_supported(types),
            None => BufferedEntrySource::new(),
        });
        if let Some(nav) = navigation {
            source.set_navigation(nav);
        }

        let monitor = VitalsMonitor::start(source.clone(), self.config.session_gap_ms);
        let handle = monitor.acquire()?;
        let view = Arc::new(PageView {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            source,
            monitor,
            handle: Mutex::new(Some(handle)),
        });

        let evicted: Vec<Arc<PageView>> = {
            let mut views = self.views.lock();
            views.push_back(Arc::clone(&view));
            let excess = views.len().saturating_sub(self.config.max_page_views.max(1));
            views.drain(..excess).collect()
        };
        for old in evicted {
            info!("페이지 뷰 한도 초과, 축출: {}", old.id);
            old.close();
        }

        debug!("페이지 뷰 생성: {}", view.id);
        Ok(view)
    }

    /// ID로 조회
    pub fn get(&self, id: &str) -> Result<Arc<PageView>, CoreError> {
        self.views
            .lock()
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| CoreError::not_found("PageView", id))
    }

    /// 페이지 뷰 삭제 (레지스트리 핸들 해제)
    pub fn remove(&self, id: &str) -> Result<(), CoreError> {
        let view = {
            let mut views = self.views.lock();
            let index = views
                .iter()
                .position(|v| v.id == id)
                .ok_or_else(|| CoreError::not_found("PageView", id))?;
            views.remove(index)
        };
        if let Some(view) = view {
            view.close();
            debug!("페이지 뷰 삭제: {id}");
        }
        Ok(())
    }

    /// 전체 해제 (서버 종료 시)
    pub fn clear(&self) {
        let views: Vec<Arc<PageView>> = self.views.lock().drain(..).collect();
        let count = views.len();
        for view in views {
            view.close();
        }
        if count > 0 {
            info!("페이지 뷰 {count}개 정리");
        }
    }

    /// 활성 페이지 뷰 수
    pub fn len(&self) -> usize {
        self.views.lock().len()
    }

    /// 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.views.lock().is_empty()
    }
}
