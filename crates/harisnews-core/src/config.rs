//! 애플리케이션 설정 구조체.
//!
//! 웹 서버 포트, 뉴스 API 연결, Web Vitals 집계, 인증 설정 등
//! 런타임 설정을 정의한다. `ConfigManager`를 통해 JSON 파일에서 로드.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 웹 서버 설정
    #[serde(default)]
    pub web: WebConfig,
    /// 뉴스 API 설정
    #[serde(default)]
    pub news: NewsConfig,
    /// Web Vitals 설정
    #[serde(default)]
    pub vitals: VitalsConfig,
    /// 인증 설정
    #[serde(default)]
    pub auth: AuthConfig,
}

// ============================================================
// 웹 서버 설정
// ============================================================

/// 웹 서버 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// 바인드 포트
    #[serde(default = "default_web_port")]
    pub port: u16,
    /// 외부 접근 허용 (false면 127.0.0.1에만 바인드)
    #[serde(default)]
    pub allow_external: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            port: default_web_port(),
            allow_external: false,
        }
    }
}

// ============================================================
// 뉴스 API 설정
// ============================================================

/// 뉴스 API 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// News API 기본 URL
    #[serde(default = "default_news_base_url")]
    pub base_url: String,
    /// API 키 (비어 있으면 폴백 데이터만 사용)
    #[serde(default)]
    pub api_key: String,
    /// 헤드라인을 가져올 출처 ID 목록
    #[serde(default = "default_news_sources")]
    pub sources: Vec<String>,
    /// 요청 타임아웃 (ms)
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: default_news_base_url(),
            api_key: String::new(),
            sources: default_news_sources(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl NewsConfig {
    /// 실제 API를 호출할 수 있는지 (키 설정 여부)
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

// ============================================================
// Web Vitals 설정
// ============================================================

/// Web Vitals 집계 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalsConfig {
    /// 페이지 뷰 계측 API 활성화
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// CLS 세션 윈도우 간격 (ms): 이 간격을 초과하면 새 세션
    #[serde(default = "default_session_gap_ms")]
    pub session_gap_ms: f64,
    /// SSE 스트림 주기적 재전송 간격 (ms)
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// 동시에 유지하는 최대 페이지 뷰 수
    #[serde(default = "default_max_page_views")]
    pub max_page_views: usize,
}

impl Default for VitalsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            session_gap_ms: default_session_gap_ms(),
            refresh_interval_ms: default_refresh_interval_ms(),
            max_page_views: default_max_page_views(),
        }
    }
}

// ============================================================
// 인증 설정
// ============================================================

/// 인증 설정: 외부 OAuth 제공자가 발급한 토큰 목록
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// 인증 강제 여부 (false면 익명 접근 허용)
    #[serde(default)]
    pub enabled: bool,
    /// 허용 토큰
    #[serde(default)]
    pub tokens: Vec<AuthToken>,
}

/// 허용 토큰 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Bearer 토큰 값
    pub token: String,
    /// 사용자 ID
    pub user_id: String,
    /// 표시 이름
    #[serde(default)]
    pub name: Option<String>,
    /// 이메일
    #[serde(default)]
    pub email: Option<String>,
}

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }

    /// 뉴스 API 요청 타임아웃을 Duration으로 반환
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.news.request_timeout_ms)
    }

    /// SSE 재전송 주기를 Duration으로 반환
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.vitals.refresh_interval_ms)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.web.port == 0 {
            return Err(CoreError::Config("web.port는 0일 수 없습니다".to_string()));
        }
        if !(self.vitals.session_gap_ms.is_finite() && self.vitals.session_gap_ms > 0.0) {
            return Err(CoreError::Config(
                "vitals.session_gap_ms는 양수여야 합니다".to_string(),
            ));
        }
        if self.vitals.refresh_interval_ms == 0 {
            return Err(CoreError::Config(
                "vitals.refresh_interval_ms는 0일 수 없습니다".to_string(),
            ));
        }
        if self.vitals.max_page_views == 0 {
            return Err(CoreError::Config(
                "vitals.max_page_views는 0일 수 없습니다".to_string(),
            ));
        }
        if self.auth.enabled && self.auth.tokens.is_empty() {
            return Err(CoreError::Config(
                "auth.enabled=true인데 허용 토큰이 없습니다".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}

fn default_web_port() -> u16 {
    3000
}

fn default_news_base_url() -> String {
    "https://newsapi.org".to_string()
}

fn default_news_sources() -> Vec<String> {
    ["bbc-news", "cnn", "the-verge", "techcrunch", "business-insider"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_session_gap_ms() -> f64 {
    1_000.0
}

fn default_refresh_interval_ms() -> u64 {
    5_000
}

fn default_max_page_views() -> usize {
    256
}
