//! 캐시된 뉴스 피드.
//!
//! 외부 공급원 결과를 메모리에 캐시하고, 실패 시 폴백 기사로 대체한다.
//! 폴백으로 채워진 피드는 `fallback` 플래그로 표시해 클라이언트가
//! 재시도 안내를 띄울 수 있게 한다.

use chrono::Utc;
use harisnews_core::error::CoreError;
use harisnews_core::models::news::{NewsItem, NewsSource, ALL_SOURCES};
use harisnews_core::ports::news::NewsProvider;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::fallback;

/// 피드 조회 결과
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    /// 기사 목록
    pub articles: Arc<Vec<NewsItem>>,
    /// 폴백 데이터 여부
    pub fallback: bool,
}

/// 뉴스 피드
pub struct NewsFeed {
    provider: Option<Arc<dyn NewsProvider>>,
    cache: Mutex<Option<FeedSnapshot>>,
}

impl NewsFeed {
    /// 외부 공급원을 사용하는 피드
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self {
            provider: Some(provider),
            cache: Mutex::new(None),
        }
    }

    /// 오프라인 피드 (항상 폴백 데이터)
    pub fn offline() -> Self {
        Self {
            provider: None,
            cache: Mutex::new(None),
        }
    }

    /// 오프라인 모드 여부
    pub fn is_offline(&self) -> bool {
        self.provider.is_none()
    }

    /// 최신 기사 목록
    ///
    /// 캐시 → 외부 공급원 → 폴백 순서. 조회 중에는 캐시 잠금을 유지해
    /// 동시 요청이 외부 API를 중복 호출하지 않는다.
    pub async fn latest(&self) -> FeedSnapshot {
        let mut cache = self.cache.lock().await;
        if let Some(snapshot) = cache.as_ref() {
            return snapshot.clone();
        }

        let Some(provider) = &self.provider else {
            debug!("오프라인 모드, 폴백 기사 사용");
            return cache.insert(fallback_snapshot()).clone();
        };

        match provider.fetch_articles().await {
            Ok(items) if items.is_empty() => {
                // 빈 결과는 캐시하지 않고 다음 요청에서 다시 조회
                info!("외부 공급원 기사 없음");
                FeedSnapshot {
                    articles: Arc::new(items),
                    fallback: false,
                }
            }
            Ok(items) => {
                info!("뉴스 피드 갱신: {}건", items.len());
                cache
                    .insert(FeedSnapshot {
                        articles: Arc::new(items),
                        fallback: false,
                    })
                    .clone()
            }
            Err(e) => {
                warn!("뉴스 조회 실패, 폴백 기사 사용: {e}");
                cache.insert(fallback_snapshot()).clone()
            }
        }
    }

    /// ID로 기사 조회: 캐시 → 최신 피드 → 폴백 순서
    pub async fn find(&self, id: &str) -> Result<NewsItem, CoreError> {
        if let Some(snapshot) = self.cache.lock().await.as_ref() {
            if let Some(item) = snapshot.articles.iter().find(|item| item.id == id) {
                return Ok(item.clone());
            }
        }

        let snapshot = self.latest().await;
        if let Some(item) = snapshot.articles.iter().find(|item| item.id == id) {
            return Ok(item.clone());
        }

        fallback::find(id, Utc::now()).ok_or_else(|| CoreError::not_found("Article", id))
    }

    /// 캐시 비우기 (다음 조회 시 외부 공급원 재호출)
    pub async fn refresh(&self) {
        *self.cache.lock().await = None;
        debug!("뉴스 캐시 초기화");
    }
}

fn fallback_snapshot() -> FeedSnapshot {
    FeedSnapshot {
        articles: Arc::new(fallback::articles(Utc::now())),
        fallback: true,
    }
}

/// 기사 목록의 출처 (처음 등장한 순서, 중복 제거)
pub fn sources(items: &[NewsItem]) -> Vec<NewsSource> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.source.id.as_str()))
        .map(|item| item.source.clone())
        .collect()
}

/// 출처 필터: `"all"`이면 전체
pub fn filter_by_source(items: &[NewsItem], source: &str) -> Vec<NewsItem> {
    if source == ALL_SOURCES {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.source.id == source)
        .cloned()
        .collect()
}
