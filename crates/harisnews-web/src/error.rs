//! API 에러 처리.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use harisnews_core::error::CoreError;
use serde::Serialize;
use thiserror::Error;

/// API 에러
#[derive(Debug, Error)]
pub enum ApiError {
    /// 내부 서버 오류
    #[error("내부 서버 오류: {0}")]
    Internal(String),

    /// 리소스를 찾을 수 없음
    #[error("리소스를 찾을 수 없음: {0}")]
    NotFound(String),

    /// 잘못된 요청
    #[error("잘못된 요청: {0}")]
    BadRequest(String),

    /// 인증 필요
    #[error("인증 필요: {0}")]
    Unauthorized(String),
}

/// 에러 응답 본문
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// 에러 메시지
    pub error: String,
    /// HTTP 상태 코드
    pub status: u16,
}

impl ApiError {
    /// HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(msg)
            | ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg) => msg,
        };

        let body = Json(ErrorResponse {
            error: message,
            status: status.as_u16(),
        });

        if status == StatusCode::UNAUTHORIZED {
            return (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response();
        }
        (status, body).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CoreError::Validation { .. } => ApiError::BadRequest(err.to_string()),
            CoreError::Auth(msg) => ApiError::Unauthorized(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ApiError::NotFound("기사".to_string());
        assert!(err.to_string().contains("기사"));
    }

    #[test]
    fn core_error_mapping() {
        let not_found: ApiError = CoreError::not_found("Article", "42").into();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = CoreError::validation("lcp", "음수 값").into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let auth: ApiError = CoreError::Auth("만료된 토큰".to_string()).into();
        assert_eq!(auth.status(), StatusCode::UNAUTHORIZED);

        let network: ApiError = CoreError::Network("timeout".to_string()).into();
        assert_eq!(network.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn unauthorized_sets_challenge_header() {
        let response = ApiError::Unauthorized("토큰 없음".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }
}
