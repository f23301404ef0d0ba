//! 성능 개선 권고.
//!
//! 점수와 독립적으로 지표별 규칙을 평가한다. 평가 순서는
//! TTFB → FCP → LCP → FID → CLS로 고정이며, 아무 규칙도 걸리지 않으면
//! 낮은 우선순위의 "양호" 권고 하나만 반환한다.

use harisnews_core::models::metrics::{MetricKind, PerformanceMetrics};
use harisnews_core::models::report::{Priority, Recommendation};

struct Advice {
    title: &'static str,
    description: &'static str,
}

/// 지표별 (poor 초과, good 초과) 권고 문구
fn advice_for(kind: MetricKind) -> (Advice, Advice) {
    match kind {
        MetricKind::Ttfb => (
            Advice {
                title: "Improve Time to First Byte",
                description: "TTFB is very slow. Consider serving through a CDN, optimizing the server, or adding server-side caching.",
            },
            Advice {
                title: "Improve Time to First Byte",
                description: "TTFB can be improved. Review server response times and consider adding caching.",
            },
        ),
        MetricKind::Fcp => (
            Advice {
                title: "Speed up First Contentful Paint",
                description: "The first content takes too long to appear. Optimize critical CSS, preload key assets, and lazy-load non-critical resources.",
            },
            Advice {
                title: "Improve First Contentful Paint",
                description: "FCP can be improved. Consider optimizing critical CSS and JavaScript.",
            },
        ),
        MetricKind::Lcp => (
            Advice {
                title: "Optimize Largest Contentful Paint",
                description: "The main content takes too long to render. Identify and optimize the largest element, preload important images, and load resources efficiently.",
            },
            Advice {
                title: "Improve Largest Contentful Paint",
                description: "LCP can be improved. Optimize images and consider more efficient rendering techniques.",
            },
        ),
        MetricKind::Fid => (
            Advice {
                title: "Reduce First Input Delay",
                description: "The page responds to user input very slowly. Break up long JavaScript tasks, free the main thread, and move heavy computation to Web Workers.",
            },
            Advice {
                title: "Improve First Input Delay",
                description: "FID can be improved. Optimize JavaScript execution and defer non-critical scripts.",
            },
        ),
        MetricKind::Cls => (
            Advice {
                title: "Fix Cumulative Layout Shift",
                description: "The layout shifts too much while the page loads. Always set dimensions for images and video, avoid injecting dynamic content, and use placeholders.",
            },
            Advice {
                title: "Reduce Layout Shift",
                description: "CLS can be improved. Make sure visual elements, especially images and ads, have their dimensions set in advance.",
            },
        ),
    }
}

/// 전체 양호 권고 제목
pub const PERFORMING_WELL_TITLE: &str = "Performance Is Good";

const PERFORMING_WELL_DESCRIPTION: &str = "All performance metrics are in the good range. Consider additional caching strategies and regular performance audits to keep these results.";

/// 스냅샷에 대한 권고 목록
///
/// 미측정 지표와 0 값은 권고를 만들지 않는다.
pub fn recommend(metrics: &PerformanceMetrics) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = MetricKind::ALL
        .iter()
        .filter_map(|kind| {
            let value = metrics.get(*kind)?;
            let t = kind.thresholds();
            let (poor, needs_work) = advice_for(*kind);
            let (advice, priority) = if value > t.poor {
                (poor, Priority::High)
            } else if value > t.good {
                (needs_work, Priority::Medium)
            } else {
                return None;
            };
            Some(Recommendation {
                metric: Some(*kind),
                title: advice.title.to_string(),
                description: advice.description.to_string(),
                priority,
            })
        })
        .collect();

    if recommendations.is_empty() {
        recommendations.push(Recommendation {
            metric: None,
            title: PERFORMING_WELL_TITLE.to_string(),
            description: PERFORMING_WELL_DESCRIPTION.to_string(),
            priority: Priority::Low,
        });
    }
    recommendations
}
