//! News API HTTP 클라이언트.
//!
//! `NewsProvider` 포트 구현. `/v2/top-headlines`에서 설정된 출처의
//! 헤드라인을 가져와 `NewsItem`으로 변환한다. 네트워크 에러와 5xx는 재시도.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use harisnews_core::config::NewsConfig;
use harisnews_core::error::CoreError;
use harisnews_core::models::news::{NewsItem, NewsSource};
use harisnews_core::ports::news::NewsProvider;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

/// 기본 재시도 횟수
const DEFAULT_MAX_RETRIES: u32 = 2;

/// 첫 재시도 대기 시간
const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(500);

const HEADLINES_PATH: &str = "/v2/top-headlines";

/// 재시도 가능한 에러인지 판별
fn is_retryable(error: &CoreError) -> bool {
    match error {
        CoreError::Network(_) => true,
        CoreError::Upstream { status, .. } => *status >= 500 || *status == 429,
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct HeadlinesResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    #[serde(default)]
    source: Option<RawSource>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    url_to_image: Option<String>,
    #[serde(default)]
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSource {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// News API 클라이언트
pub struct NewsApiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    sources: Vec<String>,
    max_retries: u32,
    retry_delay: Duration,
}

impl NewsApiClient {
    /// 새 클라이언트 생성
    pub fn new(
        base_url: &str,
        api_key: &str,
        sources: Vec<String>,
        timeout: Duration,
    ) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Network(format!("HTTP 클라이언트 빌드 실패: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            sources,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        })
    }

    /// 설정에서 생성
    pub fn from_config(config: &NewsConfig) -> Result<Self, CoreError> {
        Self::new(
            &config.base_url,
            &config.api_key,
            config.sources.clone(),
            Duration::from_millis(config.request_timeout_ms),
        )
    }

    /// 재시도 정책 설정
    pub fn with_retry(mut self, max_retries: u32, first_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = first_delay;
        self
    }

    fn headlines_url(&self) -> Result<Url, CoreError> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, HEADLINES_PATH))
            .map_err(|e| CoreError::Config(format!("잘못된 News API URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("sources", &self.sources.join(","))
            .append_pair("apiKey", &self.api_key);
        Ok(url)
    }

    /// 응답 상태 코드 확인 및 에러 매핑
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, CoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_else(|e| {
            warn!("응답 본문 읽기 실패: {e}");
            String::new()
        });
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);

        match status.as_u16() {
            401 => Err(CoreError::Auth(format!("News API 인증 실패: {message}"))),
            code => Err(CoreError::Upstream {
                status: code,
                message,
            }),
        }
    }

    async fn fetch_once(&self) -> Result<Vec<NewsItem>, CoreError> {
        let url = self.headlines_url()?;
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CoreError::Network(format!("헤드라인 요청 실패: {e}")))?;

        let resp = Self::check_response(resp).await?;
        let body: HeadlinesResponse = resp
            .json()
            .await
            .map_err(|e| CoreError::Internal(format!("헤드라인 응답 파싱 실패: {e}")))?;

        if body.status != "ok" {
            return Err(CoreError::Upstream {
                status: 200,
                message: body
                    .message
                    .unwrap_or_else(|| "Failed to fetch news".to_string()),
            });
        }

        Ok(body.articles.into_iter().map(transform).collect())
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn fetch_articles(&self) -> Result<Vec<NewsItem>, CoreError> {
        let mut delay = self.retry_delay;

        for attempt in 0..=self.max_retries {
            match self.fetch_once().await {
                Ok(items) => {
                    debug!("헤드라인 {}건 수신", items.len());
                    return Ok(items);
                }
                Err(e) if is_retryable(&e) && attempt < self.max_retries => {
                    warn!(
                        "헤드라인 요청 실패 (시도 {}/{}): {e}, {delay:?} 후 재시도",
                        attempt + 1,
                        self.max_retries + 1
                    );
                    tokio::time::sleep(delay).await;
                    delay = (delay * 2).min(Duration::from_secs(10));
                }
                Err(e) => return Err(e),
            }
        }

        Err(CoreError::Internal("헤드라인 요청 실패".to_string()))
    }
}

/// 외부 기사 → NewsItem (빈 필드는 기본값으로 채움)
fn transform(raw: RawArticle) -> NewsItem {
    let source = raw.source.unwrap_or_default();
    NewsItem {
        id: Uuid::new_v4().to_string(),
        title: non_empty(raw.title).unwrap_or_else(|| "Untitled".to_string()),
        description: non_empty(raw.description),
        content: non_empty(raw.content).map(|c| strip_truncation_marker(&c)),
        url: non_empty(raw.url).unwrap_or_else(|| "#".to_string()),
        url_to_image: non_empty(raw.url_to_image),
        published_at: raw.published_at.as_deref().and_then(parse_timestamp),
        source: NewsSource {
            id: non_empty(source.id).unwrap_or_else(|| "unknown".to_string()),
            name: non_empty(source.name).unwrap_or_else(|| "Unknown Source".to_string()),
        },
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            debug!("publishedAt 파싱 실패 ({raw}): {e}");
            None
        }
    }
}

/// 본문 끝의 `[+1234 chars]` 잘림 표시 제거
pub fn strip_truncation_marker(content: &str) -> String {
    let trimmed = content.trim_end();
    let without_bracket = trimmed.strip_suffix(']').unwrap_or(trimmed);

    let Some(body) = without_bracket.strip_suffix(" chars") else {
        return content.to_string();
    };
    let digits_start = body.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    if digits_start == body.len() {
        return content.to_string();
    }
    let Some(prefix) = body[..digits_start].strip_suffix('+') else {
        return content.to_string();
    };

    let prefix = if without_bracket.len() != trimmed.len() {
        match prefix.strip_suffix('[') {
            Some(p) => p,
            None => return content.to_string(),
        }
    } else {
        prefix
    };
    prefix.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> NewsApiClient {
        NewsApiClient::new(
            &server.url(),
            "test_key",
            vec!["bbc-news".to_string(), "cnn".to_string()],
            Duration::from_secs(5),
        )
        .unwrap()
        .with_retry(0, Duration::from_millis(10))
    }

    #[tokio::test]
    async fn fetch_and_transform_articles() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sources".into(), "bbc-news,cnn".into()),
                Matcher::UrlEncoded("apiKey".into(), "test_key".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"ok","totalResults":2,"articles":[
                    {"source":{"id":"cnn","name":"CNN"},"title":"Markets rally",
                     "description":"Stocks up","content":"Stocks rose sharply today… [+2412 chars]",
                     "url":"https://cnn.com/markets","urlToImage":null,
                     "publishedAt":"2024-05-01T12:30:00Z"},
                    {"source":{"id":null,"name":null},"title":null,"url":null}
                ]}"#,
            )
            .create_async()
            .await;

        let items = client_for(&server).fetch_articles().await.unwrap();
        mock.assert_async().await;

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Markets rally");
        assert_eq!(
            items[0].content.as_deref(),
            Some("Stocks rose sharply today…")
        );
        assert_eq!(items[0].source.name, "CNN");
        assert!(items[0].published_at.is_some());
        assert!(Uuid::parse_str(&items[0].id).is_ok());

        assert_eq!(items[1].title, "Untitled");
        assert_eq!(items[1].url, "#");
        assert_eq!(items[1].source.id, "unknown");
        assert_eq!(items[1].source.name, "Unknown Source");
        assert_ne!(items[0].id, items[1].id);
    }

    #[tokio::test]
    async fn error_status_in_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"error","code":"sourcesTooMany","message":"Too many sources"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_articles().await.unwrap_err();
        match err {
            CoreError::Upstream { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Too many sources");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch_articles().await.unwrap_err();
        assert!(matches!(err, CoreError::Auth(ref m) if m.contains("invalid")));
    }

    #[tokio::test]
    async fn server_error_is_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/top-headlines")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .expect(3)
            .create_async()
            .await;

        let client = client_for(&server).with_retry(2, Duration::from_millis(1));
        let err = client.fetch_articles().await.unwrap_err();
        mock.assert_async().await;
        assert!(matches!(err, CoreError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn connection_refused_is_network_error() {
        let client = NewsApiClient::new("http://127.0.0.1:1", "k", vec![], Duration::from_secs(1))
            .unwrap()
            .with_retry(0, Duration::from_millis(1));
        let err = client.fetch_articles().await.unwrap_err();
        assert!(matches!(err, CoreError::Network(_)));
    }

    #[test]
    fn strip_marker_variants() {
        assert_eq!(strip_truncation_marker("Body text [+123 chars]"), "Body text");
        assert_eq!(strip_truncation_marker("Body text +45 chars"), "Body text");
        assert_eq!(strip_truncation_marker("No marker here"), "No marker here");
        assert_eq!(strip_truncation_marker("Ends with [note]"), "Ends with [note]");
        assert_eq!(strip_truncation_marker("We sold 40 chars"), "We sold 40 chars");
    }

    #[test]
    fn empty_strings_use_defaults() {
        let item = transform(RawArticle {
            title: Some("  ".to_string()),
            published_at: Some("yesterday".to_string()),
            ..Default::default()
        });
        assert_eq!(item.title, "Untitled");
        assert!(item.published_at.is_none());
        assert!(item.description.is_none());
    }
}
