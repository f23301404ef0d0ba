//! 성능 점수 산출.
//!
//! 상태 없는 순수 함수. 지표별 하위 점수(0~100)를 가중 평균해
//! 0~100 정수 점수와 등급을 만든다.

use harisnews_core::models::metrics::{MetricKind, PerformanceMetrics};
use harisnews_core::models::report::{MetricRating, PerformanceReport, RatedMetric, ScoreCategory};

use crate::advisor;

/// 지표 하나의 하위 점수
///
/// - `v ≤ good` → 100
/// - `good < v ≤ poor` → 100에서 50까지 선형 감소
/// - `v > poor` → 50에서 0까지 선형 감소 (`2 × poor` 이상은 0)
///
/// 미측정(`None`)은 100으로 취급한다.
pub fn sub_score(kind: MetricKind, value: Option<f64>) -> f64 {
    let Some(value) = value else {
        return 100.0;
    };
    let t = kind.thresholds();

    if value <= t.good {
        100.0
    } else if value <= t.poor {
        100.0 - (value - t.good) / (t.poor - t.good) * 50.0
    } else {
        50.0 - ((value - t.poor) / t.poor * 50.0).min(50.0)
    }
}

/// 임계값 기준 등급
pub fn rate(kind: MetricKind, value: f64) -> MetricRating {
    let t = kind.thresholds();
    if value <= t.good {
        MetricRating::Good
    } else if value <= t.poor {
        MetricRating::NeedsImprovement
    } else {
        MetricRating::Poor
    }
}

/// 가중 종합 점수 (0 ~ 100)
pub fn score(metrics: &PerformanceMetrics) -> u8 {
    let (weighted, total_weight) = MetricKind::ALL.iter().fold((0.0, 0.0), |(sum, w), kind| {
        let weight = f64::from(kind.weight());
        (sum + sub_score(*kind, metrics.get(*kind)) * weight, w + weight)
    });

    (weighted / total_weight).round().clamp(0.0, 100.0) as u8
}

/// 지표별 평가 (고정 순서)
pub fn ratings(metrics: &PerformanceMetrics) -> Vec<RatedMetric> {
    MetricKind::ALL
        .iter()
        .map(|kind| {
            let value = metrics.get(*kind);
            RatedMetric {
                metric: *kind,
                value,
                rating: value.map(|v| rate(*kind, v)),
                sub_score: sub_score(*kind, value),
            }
        })
        .collect()
}

/// 스냅샷 전체 분석: 점수, 등급, 지표별 평가, 권고
pub fn analyze(metrics: &PerformanceMetrics) -> PerformanceReport {
    let score = score(metrics);
    PerformanceReport {
        score,
        category: ScoreCategory::from_score(score),
        measured: metrics.measured_count(),
        ratings: ratings(metrics),
        recommendations: advisor::recommend(metrics),
    }
}
