//! 사용자 세션 모델.

use serde::{Deserialize, Serialize};

/// 인증된 사용자 식별 정보 (외부 OAuth 제공자가 발급)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// 사용자 ID
    pub user_id: String,
    /// 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 이메일
    #[serde(default)]
    pub email: Option<String>,
}

impl UserIdentity {
    /// 인증 비활성화 시 사용하는 익명 사용자
    pub fn anonymous() -> Self {
        Self {
            user_id: "anonymous".to_string(),
            name: None,
            email: None,
        }
    }
}
