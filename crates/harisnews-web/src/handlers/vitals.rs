//! Web Vitals 핸들러.
//!
//! 페이지 뷰 생성, 비컨 엔트리 수신, 스냅샷/리포트 조회, 무상태 분석.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use harisnews_core::error::CoreError;
use harisnews_core::models::entry::EntryType;
use harisnews_core::models::metrics::{MetricKind, PerformanceMetrics};
use harisnews_vitals::presenter::{self, DashboardView};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 페이지 뷰 생성 요청
#[derive(Debug, Default, Deserialize)]
pub struct CreateViewRequest {
    /// 이미 완료된 내비게이션 엔트리
    #[serde(default)]
    pub navigation: Option<Value>,
    /// 클라이언트가 관찰 가능한 엔트리 유형 (생략 시 전체)
    #[serde(default)]
    pub supported: Option<Vec<EntryType>>,
}

/// 페이지 뷰 생성 응답
#[derive(Debug, Serialize)]
pub struct CreateViewResponse {
    /// 페이지 뷰 ID
    pub view_id: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
}

/// 엔트리 비컨
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    /// 내비게이션 엔트리
    #[serde(default)]
    pub navigation: Option<Value>,
    /// 원시 성능 엔트리
    #[serde(default)]
    pub entries: Vec<Value>,
}

/// 엔트리 수신 결과
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// 수신된 엔트리 수
    pub accepted: usize,
    /// 무시된 엔트리 수
    pub ignored: usize,
    /// 반영 후 스냅샷
    pub metrics: PerformanceMetrics,
}

/// 페이지 뷰 스냅샷
#[derive(Debug, Serialize)]
pub struct ViewSnapshot {
    /// 페이지 뷰 ID
    pub view_id: String,
    /// 생성 시각
    pub created_at: DateTime<Utc>,
    /// 최신 지표
    pub metrics: PerformanceMetrics,
}

/// POST /api/vitals/views
pub async fn create_view(
    State(state): State<AppState>,
    Json(request): Json<CreateViewRequest>,
) -> Result<(StatusCode, Json<CreateViewResponse>), ApiError> {
    let view = state.views.create(request.navigation, request.supported)?;
    Ok((
        StatusCode::CREATED,
        Json(CreateViewResponse {
            view_id: view.id().to_string(),
            created_at: view.created_at(),
        }),
    ))
}

/// POST /api/vitals/views/{id}/entries
pub async fn ingest_entries(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let view = state.views.get(&id)?;
    let summary = view.ingest(request.navigation, request.entries);
    debug!(
        "비컨 수신 {id}: 반영 {}, 무시 {}",
        summary.accepted, summary.ignored
    );
    Ok(Json(IngestResponse {
        accepted: summary.accepted,
        ignored: summary.ignored,
        metrics: view.snapshot(),
    }))
}

/// GET /api/vitals/views/{id}
pub async fn get_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewSnapshot>, ApiError> {
    let view = state.views.get(&id)?;
    Ok(Json(ViewSnapshot {
        view_id: view.id().to_string(),
        created_at: view.created_at(),
        metrics: view.snapshot(),
    }))
}

/// GET /api/vitals/views/{id}/report
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DashboardView>, ApiError> {
    let view = state.views.get(&id)?;
    Ok(Json(presenter::present(&view.snapshot())))
}

/// DELETE /api/vitals/views/{id}
pub async fn delete_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.views.remove(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/vitals/analyze
///
/// 페이지 뷰 없이 전달받은 스냅샷만으로 리포트를 만든다.
pub async fn analyze(
    Json(metrics): Json<PerformanceMetrics>,
) -> Result<Json<DashboardView>, ApiError> {
    validate_metrics(&metrics)?;
    Ok(Json(presenter::present(&metrics)))
}

/// 측정값은 0 이상의 유한수여야 한다
fn validate_metrics(metrics: &PerformanceMetrics) -> Result<(), CoreError> {
    for kind in MetricKind::ALL {
        if let Some(value) = metrics.get(kind) {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::validation(
                    kind.as_str(),
                    format!("0 이상의 유한수여야 합니다 (입력: {value})"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_negative() {
        let metrics = PerformanceMetrics {
            lcp: Some(-1.0),
            ..Default::default()
        };
        let err = validate_metrics(&metrics).unwrap_err();
        assert!(matches!(err, CoreError::Validation { ref field, .. } if field == "lcp"));
    }

    #[test]
    fn validate_accepts_partial_snapshot() {
        let metrics = PerformanceMetrics {
            ttfb: Some(0.0),
            cls: Some(0.12),
            ..Default::default()
        };
        assert!(validate_metrics(&metrics).is_ok());
        assert!(validate_metrics(&PerformanceMetrics::default()).is_ok());
    }

    #[test]
    fn create_request_defaults() {
        let request: CreateViewRequest = serde_json::from_str("{}").unwrap();
        assert!(request.navigation.is_none());
        assert!(request.supported.is_none());

        let request: CreateViewRequest =
            serde_json::from_str(r#"{"supported": ["paint", "layout-shift"]}"#).unwrap();
        assert_eq!(
            request.supported,
            Some(vec![EntryType::Paint, EntryType::LayoutShift])
        );
    }
}
