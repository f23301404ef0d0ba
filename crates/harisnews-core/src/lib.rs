//! # harisnews-core
//!
//! Haris News 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (serde Serialize/Deserialize)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 애플리케이션 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;

#[cfg(test)]
mod tests {
    use crate::models::metrics::{MetricKind, PerformanceMetrics};

    #[test]
    fn config_defaults() {
        let config = crate::config::AppConfig::default_config();
        assert_eq!(config.vitals.session_gap_ms, 1_000.0);
        assert_eq!(config.vitals.refresh_interval_ms, 5_000);
        assert_eq!(config.vitals.max_page_views, 256);
        assert!(config.vitals.enabled);
    }

    #[test]
    fn thresholds_are_ordered() {
        for kind in MetricKind::ALL {
            let t = kind.thresholds();
            assert!(t.good < t.poor, "{kind}");
        }
        assert_eq!(PerformanceMetrics::default().measured_count(), 0);
    }
}
