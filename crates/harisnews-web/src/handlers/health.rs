//! 헬스 체크.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// 헬스 체크 응답
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// 항상 "ok"
    pub status: &'static str,
    /// 서버 버전
    pub version: &'static str,
    /// 뉴스 피드 오프라인 모드 여부
    pub news_offline: bool,
    /// 활성 페이지 뷰 수
    pub page_views: usize,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        news_offline: state.feed.is_offline(),
        page_views: state.views.len(),
    })
}
