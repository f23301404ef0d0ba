//! 성능 대시보드 프레젠터.
//!
//! PerformanceMetrics / PerformanceReport → 화면 표시용 데이터 변환.

use harisnews_core::models::metrics::{MetricKind, PerformanceMetrics};
use harisnews_core::models::report::{MetricRating, PerformanceReport, ScoreCategory};
use serde::Serialize;

use crate::scorer;

/// 지표 카드 표시 데이터
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricView {
    /// 지표
    pub metric: MetricKind,
    /// 이름
    pub label: &'static str,
    /// 툴팁 설명
    pub description: &'static str,
    /// 표시 값
    pub value_text: String,
    /// 등급 (미측정은 None)
    pub rating: Option<MetricRating>,
    /// 등급 라벨
    pub rating_label: &'static str,
}

/// 종합 점수 표시 데이터
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreView {
    /// 점수
    pub score: u8,
    /// 등급
    pub category: ScoreCategory,
    /// 헤드라인
    pub headline: &'static str,
    /// 설명
    pub description: &'static str,
}

/// 리포트 화면 전체
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    /// 원본 스냅샷
    pub metrics: PerformanceMetrics,
    /// 분석 결과
    pub report: PerformanceReport,
    /// 지표 카드
    pub cards: Vec<MetricView>,
    /// 종합 점수
    pub summary: ScoreView,
}

/// 스냅샷 → 지표 카드 목록 (고정 순서)
pub fn present_metrics(metrics: &PerformanceMetrics) -> Vec<MetricView> {
    MetricKind::ALL
        .iter()
        .map(|kind| {
            let value = metrics.get(*kind);
            let rating = value.map(|v| scorer::rate(*kind, v));
            MetricView {
                metric: *kind,
                label: label(*kind),
                description: description(*kind),
                value_text: value
                    .map(|v| format_value(*kind, v))
                    .unwrap_or_else(|| "n/a".to_string()),
                rating,
                rating_label: rating.map(rating_label).unwrap_or("Not measured"),
            }
        })
        .collect()
}

/// 리포트 → 종합 점수 표시
pub fn present_score(report: &PerformanceReport) -> ScoreView {
    let (headline, description) = category_text(report.category);
    ScoreView {
        score: report.score,
        category: report.category,
        headline,
        description,
    }
}

/// 스냅샷 분석 + 표시 데이터 일괄 생성
pub fn present(metrics: &PerformanceMetrics) -> DashboardView {
    let report = scorer::analyze(metrics);
    DashboardView {
        metrics: *metrics,
        cards: present_metrics(metrics),
        summary: present_score(&report),
        report,
    }
}

/// 값 포맷: CLS는 소수 셋째 자리, 나머지는 정수 ms
pub fn format_value(kind: MetricKind, value: f64) -> String {
    if kind.is_timing() {
        format!("{value:.0} ms")
    } else {
        format!("{value:.3}")
    }
}

fn label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Ttfb => "Time to First Byte",
        MetricKind::Fcp => "First Contentful Paint",
        MetricKind::Lcp => "Largest Contentful Paint",
        MetricKind::Fid => "First Input Delay",
        MetricKind::Cls => "Cumulative Layout Shift",
    }
}

fn description(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::Ttfb => "Time taken to receive the first byte from the server",
        MetricKind::Fcp => "Time until the first content (text, image, etc.) is displayed",
        MetricKind::Lcp => "Time until the largest content element is displayed",
        MetricKind::Fid => "Delay before the page responds to the first user interaction",
        MetricKind::Cls => "Measures visual layout shifts while the page loads",
    }
}

fn rating_label(rating: MetricRating) -> &'static str {
    match rating {
        MetricRating::Good => "Good",
        MetricRating::NeedsImprovement => "Needs Improvement",
        MetricRating::Poor => "Poor",
    }
}

fn category_text(category: ScoreCategory) -> (&'static str, &'static str) {
    match category {
        ScoreCategory::Excellent => (
            "Excellent",
            "Your website performance is excellent! Users should have a great experience.",
        ),
        ScoreCategory::Good => (
            "Good",
            "Your website performs well, but there's still room for improvement.",
        ),
        ScoreCategory::Average => (
            "Needs Improvement",
            "Your website performance needs improvement to provide a better user experience.",
        ),
        ScoreCategory::Poor => (
            "Poor",
            "Your website performance is poor and may be frustrating users. Immediate action is recommended.",
        ),
    }
}
