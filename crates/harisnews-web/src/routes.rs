//! API 라우트 정의.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::AppState;

/// API 라우트 생성 (`/api` 하위)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // 세션 (공개)
        .route("/auth/session", get(handlers::session::get_session))
        // 뉴스 피드
        .route("/news", get(handlers::news::list_news))
        .route("/news/sources", get(handlers::news::list_sources))
        .route("/news/refresh", post(handlers::news::refresh_news))
        .route("/news/{id}", get(handlers::news::get_article))
        // Web Vitals 페이지 뷰
        .route("/vitals/views", post(handlers::vitals::create_view))
        .route(
            "/vitals/views/{id}",
            get(handlers::vitals::get_view).delete(handlers::vitals::delete_view),
        )
        .route(
            "/vitals/views/{id}/entries",
            post(handlers::vitals::ingest_entries),
        )
        .route("/vitals/views/{id}/report", get(handlers::vitals::get_report))
        // 실시간 스트림 (SSE)
        .route(
            "/vitals/views/{id}/stream",
            get(handlers::stream::vitals_stream),
        )
        // 무상태 분석
        .route("/vitals/analyze", post(handlers::vitals::analyze))
}
