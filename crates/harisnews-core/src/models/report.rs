//! 성능 분석 리포트 모델.
//!
//! 점수, 등급, 지표별 평가, 권고 사항.

use serde::{Deserialize, Serialize};

use super::metrics::MetricKind;

/// 권고 우선순위
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// 종합 점수 등급
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScoreCategory {
    /// 90 이상
    Excellent,
    /// 70 이상
    Good,
    /// 50 이상
    Average,
    /// 50 미만
    Poor,
}

impl ScoreCategory {
    /// 점수 → 등급
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreCategory::Excellent,
            70..=89 => ScoreCategory::Good,
            50..=69 => ScoreCategory::Average,
            _ => ScoreCategory::Poor,
        }
    }
}

/// 단일 지표 평가 등급
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MetricRating {
    Good,
    NeedsImprovement,
    Poor,
}

/// 개선 권고
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Recommendation {
    /// 대상 지표 (전체 양호 권고는 None)
    pub metric: Option<MetricKind>,
    /// 제목
    pub title: String,
    /// 설명
    pub description: String,
    /// 우선순위
    pub priority: Priority,
}

/// 지표별 평가 결과
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RatedMetric {
    /// 지표
    pub metric: MetricKind,
    /// 측정값 (미측정은 None)
    pub value: Option<f64>,
    /// 평가 등급 (미측정은 None)
    pub rating: Option<MetricRating>,
    /// 하위 점수 (0 ~ 100)
    pub sub_score: f64,
}

/// 성능 분석 리포트
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PerformanceReport {
    /// 종합 점수 (0 ~ 100)
    pub score: u8,
    /// 등급
    pub category: ScoreCategory,
    /// 측정된 지표 개수 (0 ~ 5)
    pub measured: usize,
    /// 지표별 평가 (고정 순서)
    pub ratings: Vec<RatedMetric>,
    /// 권고 사항
    pub recommendations: Vec<Recommendation>,
}
