//! 뉴스 피드 핸들러.

use axum::extract::{Path, Query, State};
use axum::Json;
use harisnews_core::models::news::{NewsItem, NewsSource, ALL_SOURCES};
use harisnews_news::feed;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 피드 조회 쿼리
#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    /// 출처 ID (기본: "all")
    pub source: Option<String>,
}

/// 피드 응답
#[derive(Debug, Serialize)]
pub struct NewsResponse {
    /// 기사 목록 (필터 적용)
    pub articles: Vec<NewsItem>,
    /// 전체 피드의 출처 목록
    pub sources: Vec<NewsSource>,
    /// 폴백 데이터 여부 (true면 클라이언트가 재시도를 안내)
    pub fallback: bool,
}

/// GET /api/news?source=
pub async fn list_news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let snapshot = state.feed.latest().await;
    let source = query.source.as_deref().unwrap_or(ALL_SOURCES);
    let articles = feed::filter_by_source(&snapshot.articles, source);
    debug!("뉴스 조회: source={source}, {}건", articles.len());

    Json(NewsResponse {
        articles,
        sources: feed::sources(&snapshot.articles),
        fallback: snapshot.fallback,
    })
}

/// GET /api/news/{id}
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NewsItem>, ApiError> {
    let item = state.feed.find(&id).await?;
    Ok(Json(item))
}

/// GET /api/news/sources
pub async fn list_sources(State(state): State<AppState>) -> Json<Vec<NewsSource>> {
    let snapshot = state.feed.latest().await;
    Json(feed::sources(&snapshot.articles))
}

/// POST /api/news/refresh
///
/// 캐시를 비우고 다시 조회한다. 폴백 피드의 재시도 동작.
pub async fn refresh_news(State(state): State<AppState>) -> Json<NewsResponse> {
    state.feed.refresh().await;
    list_news(State(state), Query(NewsQuery { source: None })).await
}
