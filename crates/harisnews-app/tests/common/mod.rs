//! 라우터 통합 테스트 공용 도우미.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use harisnews_core::config::{AppConfig, AuthToken};
use harisnews_core::ports::session::SessionVerifier;
use harisnews_news::NewsFeed;
use harisnews_web::{StaticTokenVerifier, WebServer};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// 테스트용 토큰
pub const TEST_TOKEN: &str = "test-token";

/// 설정과 피드로 서버 구성 (실제 바인드 없음)
pub fn server(config: &AppConfig, feed: NewsFeed) -> WebServer {
    let verifier: Arc<dyn SessionVerifier> =
        Arc::new(StaticTokenVerifier::from_config(&config.auth));
    WebServer::new(config, Arc::new(feed), verifier)
}

/// 오프라인 피드 + 인증 비활성화 라우터
pub fn offline_app() -> Router {
    server(&AppConfig::default_config(), NewsFeed::offline()).router()
}

/// 인증 게이트가 켜진 설정
pub fn auth_config() -> AppConfig {
    let mut config = AppConfig::default_config();
    config.auth.enabled = true;
    config.auth.tokens = vec![AuthToken {
        token: TEST_TOKEN.to_string(),
        user_id: "tester".to_string(),
        name: Some("Test User".to_string()),
        email: Some("tester@example.com".to_string()),
    }];
    config
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// 요청 전송 후 (상태 코드, JSON 본문)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
