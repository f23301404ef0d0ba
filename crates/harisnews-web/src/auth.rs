//! 인증 게이트.
//!
//! `/health`와 `/api/auth` 외의 모든 요청은 Bearer 토큰이 필요하다.
//! 검증된 사용자 정보는 요청 extension으로 핸들러에 전달된다.

use async_trait::async_trait;
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::Next;
use axum::response::Response;
use harisnews_core::config::AuthConfig;
use harisnews_core::error::CoreError;
use harisnews_core::models::session::UserIdentity;
use harisnews_core::ports::session::SessionVerifier;
use std::collections::HashMap;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 인증 없이 접근 가능한 경로
const PUBLIC_PATHS: [&str; 2] = ["/health", "/api/auth"];

/// 설정 파일의 정적 토큰 목록으로 검증
pub struct StaticTokenVerifier {
    enabled: bool,
    tokens: HashMap<String, UserIdentity>,
}

impl StaticTokenVerifier {
    /// 인증 설정으로 생성
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .tokens
            .iter()
            .map(|t| {
                (
                    t.token.clone(),
                    UserIdentity {
                        user_id: t.user_id.clone(),
                        name: t.name.clone(),
                        email: t.email.clone(),
                    },
                )
            })
            .collect();
        Self {
            enabled: config.enabled,
            tokens,
        }
    }

    /// 등록된 토큰 수
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl SessionVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Option<UserIdentity>, CoreError> {
        Ok(self.tokens.get(token).cloned())
    }

    fn allows_anonymous(&self) -> bool {
        !self.enabled
    }
}

/// 공개 경로 여부 (`/api/auth` 하위 경로 포함)
pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| {
        path == *public
            || path
                .strip_prefix(public)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// `Authorization: Bearer <token>` 헤더 값
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// 요청 헤더로 사용자 확인
///
/// 인증이 꺼져 있으면 토큰과 무관하게 익명 사용자로 통과시킨다.
pub async fn authenticate(
    verifier: &dyn SessionVerifier,
    headers: &HeaderMap,
) -> Result<UserIdentity, ApiError> {
    if verifier.allows_anonymous() {
        return Ok(UserIdentity::anonymous());
    }

    let token = bearer_token(headers)
        .ok_or_else(|| ApiError::Unauthorized("Bearer 토큰이 필요합니다".to_string()))?;

    verifier
        .verify(token)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("유효하지 않은 토큰".to_string()))
}

/// 인증 미들웨어
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let identity = authenticate(state.verifier.as_ref(), request.headers()).await?;
    debug!("인증 통과: {}", identity.user_id);
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}
