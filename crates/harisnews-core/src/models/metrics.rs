//! Web Vitals 메트릭 모델.
//!
//! 다섯 가지 성능 지표(TTFB, FCP, LCP, FID, CLS)의 스냅샷과
//! 부분 갱신(patch), 지표별 임계값/가중치를 정의한다.

use serde::{Deserialize, Serialize};

/// 지표 종류 (평가 순서: TTFB → FCP → LCP → FID → CLS)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Time to First Byte
    Ttfb,
    /// First Contentful Paint
    Fcp,
    /// Largest Contentful Paint
    Lcp,
    /// First Input Delay
    Fid,
    /// Cumulative Layout Shift
    Cls,
}

/// 지표별 good / poor 임계값
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// 이 값 이하면 good
    pub good: f64,
    /// 이 값 초과면 poor
    pub poor: f64,
}

impl MetricKind {
    /// 고정 평가 순서
    pub const ALL: [MetricKind; 5] = [
        MetricKind::Ttfb,
        MetricKind::Fcp,
        MetricKind::Lcp,
        MetricKind::Fid,
        MetricKind::Cls,
    ];

    /// Core Web Vitals 임계값
    pub fn thresholds(self) -> Thresholds {
        match self {
            MetricKind::Ttfb => Thresholds {
                good: 200.0,
                poor: 500.0,
            },
            MetricKind::Fcp => Thresholds {
                good: 1800.0,
                poor: 3000.0,
            },
            MetricKind::Lcp => Thresholds {
                good: 2500.0,
                poor: 4000.0,
            },
            MetricKind::Fid => Thresholds {
                good: 100.0,
                poor: 300.0,
            },
            MetricKind::Cls => Thresholds {
                good: 0.1,
                poor: 0.25,
            },
        }
    }

    /// 종합 점수 가중치 (합계 100)
    pub fn weight(self) -> u32 {
        match self {
            MetricKind::Lcp | MetricKind::Fid | MetricKind::Cls => 25,
            MetricKind::Ttfb => 15,
            MetricKind::Fcp => 10,
        }
    }

    /// 약어 (소문자)
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Ttfb => "ttfb",
            MetricKind::Fcp => "fcp",
            MetricKind::Lcp => "lcp",
            MetricKind::Fid => "fid",
            MetricKind::Cls => "cls",
        }
    }

    /// 밀리초 단위 지표인지 (CLS만 무단위)
    pub fn is_timing(self) -> bool {
        !matches!(self, MetricKind::Cls)
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 페이지 뷰 하나의 성능 지표 스냅샷
///
/// `None`은 아직 측정되지 않은 지표, `Some(0.0)`은 측정된 0 값이다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// 요청 시작 → 첫 응답 바이트 (ms)
    #[serde(default)]
    pub ttfb: Option<f64>,
    /// 첫 콘텐츠 페인트 (ms)
    #[serde(default)]
    pub fcp: Option<f64>,
    /// 최대 콘텐츠 페인트 (ms, 최신 후보)
    #[serde(default)]
    pub lcp: Option<f64>,
    /// 첫 입력 지연 (ms)
    #[serde(default)]
    pub fid: Option<f64>,
    /// 최악 세션의 누적 레이아웃 이동
    #[serde(default)]
    pub cls: Option<f64>,
}

impl PerformanceMetrics {
    /// 지표 값 조회
    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Ttfb => self.ttfb,
            MetricKind::Fcp => self.fcp,
            MetricKind::Lcp => self.lcp,
            MetricKind::Fid => self.fid,
            MetricKind::Cls => self.cls,
        }
    }

    /// 지표 값 설정
    pub fn set(&mut self, kind: MetricKind, value: f64) {
        let slot = match kind {
            MetricKind::Ttfb => &mut self.ttfb,
            MetricKind::Fcp => &mut self.fcp,
            MetricKind::Lcp => &mut self.lcp,
            MetricKind::Fid => &mut self.fid,
            MetricKind::Cls => &mut self.cls,
        };
        *slot = Some(value);
    }

    /// 부분 갱신 병합: patch에 없는 필드는 유지
    pub fn apply(&mut self, patch: &MetricPatch) {
        for kind in MetricKind::ALL {
            if let Some(value) = patch.get(kind) {
                self.set(kind, value);
            }
        }
    }

    /// 측정된 지표 개수
    pub fn measured_count(&self) -> usize {
        MetricKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_some())
            .count()
    }
}

/// 부분 지표 갱신
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricPatch(PerformanceMetrics);

impl MetricPatch {
    /// 단일 지표 patch
    pub fn single(kind: MetricKind, value: f64) -> Self {
        let mut inner = PerformanceMetrics::default();
        inner.set(kind, value);
        Self(inner)
    }

    /// 지표 추가 (builder)
    pub fn with(mut self, kind: MetricKind, value: f64) -> Self {
        self.0.set(kind, value);
        self
    }

    /// patch에 포함된 값 조회
    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        self.0.get(kind)
    }

    /// 비어 있는지
    pub fn is_empty(&self) -> bool {
        self.0.measured_count() == 0
    }
}

impl From<PerformanceMetrics> for MetricPatch {
    fn from(metrics: PerformanceMetrics) -> Self {
        Self(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_100() {
        let total: u32 = MetricKind::ALL.iter().map(|k| k.weight()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn apply_preserves_absent_fields() {
        let mut metrics = PerformanceMetrics::default();
        metrics.apply(&MetricPatch::single(MetricKind::Ttfb, 120.0));
        metrics.apply(&MetricPatch::single(MetricKind::Lcp, 1800.0).with(MetricKind::Cls, 0.02));

        assert_eq!(metrics.ttfb, Some(120.0));
        assert_eq!(metrics.lcp, Some(1800.0));
        assert_eq!(metrics.cls, Some(0.02));
        assert_eq!(metrics.fcp, None);
        assert_eq!(metrics.measured_count(), 3);
    }

    #[test]
    fn later_patch_overwrites() {
        let mut metrics = PerformanceMetrics::default();
        metrics.apply(&MetricPatch::single(MetricKind::Lcp, 900.0));
        metrics.apply(&MetricPatch::single(MetricKind::Lcp, 1400.0));
        assert_eq!(metrics.lcp, Some(1400.0));
    }

    #[test]
    fn unmeasured_serializes_as_null() {
        let metrics = PerformanceMetrics {
            ttfb: Some(0.0),
            ..Default::default()
        };
        let json = serde_json::to_value(metrics).unwrap();
        assert_eq!(json["ttfb"], serde_json::json!(0.0));
        assert!(json["lcp"].is_null());
    }

    #[test]
    fn missing_fields_deserialize_as_unmeasured() {
        let metrics: PerformanceMetrics = serde_json::from_str(r#"{"lcp": 2100}"#).unwrap();
        assert_eq!(metrics.lcp, Some(2100.0));
        assert_eq!(metrics.ttfb, None);
    }

    #[test]
    fn empty_patch() {
        assert!(MetricPatch::default().is_empty());
        assert!(!MetricPatch::single(MetricKind::Fid, 0.0).is_empty());
    }
}
