//! Haris News 도메인 모델.
//!
//! 성능 지표, 계측 엔트리, 분석 리포트, 뉴스 기사, 사용자 세션.
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod entry;
pub mod metrics;
pub mod news;
pub mod report;
pub mod session;
