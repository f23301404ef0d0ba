//! 뉴스 기사 모델.
//!
//! 외부 뉴스 API 응답을 변환한 기사와 출처 구조체.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 기사 출처
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewsSource {
    /// 출처 ID (예: "bbc-news")
    pub id: String,
    /// 표시 이름 (예: "BBC News")
    pub name: String,
}

/// 뉴스 기사
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// 기사 ID (피드 내 고유)
    pub id: String,
    /// 제목
    pub title: String,
    /// 요약
    pub description: Option<String>,
    /// 본문
    pub content: Option<String>,
    /// 원문 URL
    pub url: String,
    /// 대표 이미지 URL
    pub url_to_image: Option<String>,
    /// 발행 시각
    pub published_at: Option<DateTime<Utc>>,
    /// 출처
    pub source: NewsSource,
}

/// 전체 출처를 뜻하는 필터 값
pub const ALL_SOURCES: &str = "all";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_item_uses_camel_case() {
        let item = NewsItem {
            id: "1".to_string(),
            title: "제목".to_string(),
            description: None,
            content: None,
            url: "https://example.com".to_string(),
            url_to_image: Some("https://picsum.photos/id/1/800/450".to_string()),
            published_at: None,
            source: NewsSource {
                id: "cnn".to_string(),
                name: "CNN".to_string(),
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("urlToImage").is_some());
        assert!(json.get("publishedAt").is_some());
        assert_eq!(json["source"]["name"], "CNN");
    }
}
