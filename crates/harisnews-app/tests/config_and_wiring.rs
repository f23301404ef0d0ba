//! 설정 및 DI 와이어링 통합 테스트.
//!
//! AppConfig → ConfigManager → 어댑터 생성 검증.

mod common;

use harisnews_core::config::AppConfig;
use harisnews_core::config_manager::ConfigManager;
use harisnews_core::ports::session::SessionVerifier;
use harisnews_news::{NewsApiClient, NewsFeed};
use harisnews_web::StaticTokenVerifier;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn config_defaults_are_valid() {
    let config = AppConfig::default_config();
    assert!(config.validate().is_ok());

    assert_eq!(config.web.port, 3000);
    assert!(!config.web.allow_external);

    assert!(!config.news.base_url.is_empty());
    assert_eq!(config.news.sources.len(), 5);
    assert!(!config.news.has_api_key());

    assert!(config.vitals.enabled);
    assert_eq!(config.vitals.session_gap_ms, 1_000.0);
    assert!(config.vitals.max_page_views > 0);

    assert!(!config.auth.enabled);
}

#[test]
fn config_duration_conversions() {
    let config = AppConfig::default_config();
    assert_eq!(
        config.request_timeout(),
        Duration::from_millis(config.news.request_timeout_ms)
    );
    assert_eq!(
        config.refresh_interval(),
        Duration::from_millis(config.vitals.refresh_interval_ms)
    );
}

#[test]
fn config_manager_persists_updates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let manager = ConfigManager::with_path(path.clone()).unwrap();
    assert!(path.exists());

    manager
        .update_with(|config| {
            config.web.port = 4100;
            config.news.api_key = "file-key".to_string();
        })
        .unwrap();

    let reopened = ConfigManager::with_path(path).unwrap();
    let config = reopened.get();
    assert_eq!(config.web.port, 4100);
    assert_eq!(config.news.api_key, "file-key");
}

#[test]
fn invalid_update_is_rejected() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::with_path(dir.path().join("config.json")).unwrap();

    let result = manager.update_with(|config| config.vitals.refresh_interval_ms = 0);
    assert!(result.is_err());
    assert_eq!(manager.get().vitals.refresh_interval_ms, 5_000);
}

#[test]
fn partial_config_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"web": {"port": 8081}, "auth": {"enabled": false}}"#).unwrap();

    let config = ConfigManager::with_path(path).unwrap().get();
    assert_eq!(config.web.port, 8081);
    assert_eq!(config.news.request_timeout_ms, 10_000);
    assert_eq!(config.vitals.max_page_views, 256);
}

#[test]
fn all_adapters_instantiate_from_config() {
    let mut config = common::auth_config();
    config.news.api_key = "key".to_string();

    let client = NewsApiClient::from_config(&config.news);
    assert!(client.is_ok());

    let verifier = StaticTokenVerifier::from_config(&config.auth);
    assert_eq!(verifier.token_count(), 1);
    assert!(!verifier.allows_anonymous());

    let server = common::server(&config, NewsFeed::offline());
    assert_eq!(server.url(), "http://localhost:3000");
    assert!(server.state().views.is_empty());
}

#[test]
fn offline_feed_serves_fallback() {
    let feed = NewsFeed::offline();
    let snapshot = tokio_test::block_on(feed.latest());
    assert!(snapshot.fallback);
    assert_eq!(snapshot.articles.len(), 6);
}
