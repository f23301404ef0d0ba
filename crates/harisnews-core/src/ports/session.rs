//! 인증 세션 포트.
//!
//! OAuth 로그인 자체는 외부 제공자가 담당하고, 서버는 발급된 토큰만 검증한다.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::session::UserIdentity;

/// Bearer 토큰 검증기
#[async_trait]
pub trait SessionVerifier: Send + Sync {
    /// 토큰 검증: 유효하면 사용자 정보, 아니면 None
    async fn verify(&self, token: &str) -> Result<Option<UserIdentity>, CoreError>;

    /// 토큰 없이 접근 허용 여부 (인증 비활성화)
    fn allows_anonymous(&self) -> bool {
        false
    }
}
