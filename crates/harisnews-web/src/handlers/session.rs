//! 세션 조회 (공개 경로).

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use harisnews_core::models::session::UserIdentity;
use serde::Serialize;

use crate::auth;
use crate::AppState;

/// 세션 상태 응답
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// 인증 여부
    pub authenticated: bool,
    /// 인증 게이트 활성화 여부
    pub auth_enabled: bool,
    /// 사용자 정보
    pub user: Option<UserIdentity>,
}

/// GET /api/auth/session
///
/// 토큰이 없거나 유효하지 않아도 401 대신 `authenticated: false`를 돌려준다.
pub async fn get_session(State(state): State<AppState>, headers: HeaderMap) -> Json<SessionResponse> {
    let auth_enabled = !state.verifier.allows_anonymous();
    let user = auth::authenticate(state.verifier.as_ref(), &headers).await.ok();
    Json(SessionResponse {
        authenticated: user.is_some(),
        auth_enabled,
        user,
    })
}
