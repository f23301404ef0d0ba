//! # harisnews-app
//!
//! Haris News 서버 바이너리 진입점.
//! 설정 로드, 어댑터 와이어링, 라이프사이클 관리.

mod lifecycle;

use anyhow::{anyhow, Result};
use clap::Parser;
use harisnews_core::config::AppConfig;
use harisnews_core::config_manager::ConfigManager;
use harisnews_core::ports::session::SessionVerifier;
use harisnews_news::{NewsApiClient, NewsFeed};
use harisnews_web::{StaticTokenVerifier, WebServer};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::lifecycle::LifecycleManager;

/// News API 키 환경변수 (설정 파일보다 우선)
const NEWS_API_KEY_ENV: &str = "NEWS_API_KEY";

/// Haris News 서버
///
/// 뉴스 피드와 Web Vitals 성능 리포트를 제공하는 API 서버
#[derive(Parser, Debug)]
#[command(name = "harisnews")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 오프라인 모드로 실행 (News API 호출 없이 고정 기사만 사용)
    #[arg(long, short = 'o')]
    offline: bool,

    /// 서버 포트 (기본: 설정 파일 값)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, short = 'l', default_value = "info")]
    log_level: String,

    /// 설정 파일 경로 (기본: 플랫폼 설정 디렉토리의 config.json)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// 외부 접속 허용 (0.0.0.0 바인드)
    #[arg(long)]
    allow_external: bool,
}

/// CLI 인자와 환경변수로 설정 오버라이드 (파일에는 저장하지 않음)
fn apply_overrides(config: &mut AppConfig, args: &Args, env_api_key: Option<String>) {
    if let Some(port) = args.port {
        config.web.port = port;
    }
    if args.allow_external {
        config.web.allow_external = true;
    }
    if let Some(key) = env_api_key.filter(|k| !k.trim().is_empty()) {
        config.news.api_key = key;
    }
}

/// 뉴스 피드 구성
///
/// API 키가 없으면 오프라인 피드로 대체한다.
fn build_feed(config: &AppConfig, offline: bool) -> Result<NewsFeed> {
    if offline {
        info!("오프라인 모드: 고정 기사만 제공");
        return Ok(NewsFeed::offline());
    }
    if !config.news.has_api_key() {
        warn!("News API 키 없음 ({NEWS_API_KEY_ENV}), 오프라인 피드 사용");
        return Ok(NewsFeed::offline());
    }

    let client = NewsApiClient::from_config(&config.news)
        .map_err(|e| anyhow!("News API 클라이언트 생성 실패: {e}"))?;
    info!("News API: {}", config.news.base_url);
    Ok(NewsFeed::new(Arc::new(client)))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "harisnews={0},harisnews_app={0},harisnews_core={0},harisnews_vitals={0},harisnews_news={0},harisnews_web={0},tower_http={0}",
        args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("Haris News 서버 시작");

    // 설정 로드
    let config_manager = match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .map_err(|e| anyhow!("설정 로드 실패: {e}"))?;
    info!("설정 파일: {}", config_manager.config_path().display());

    let mut config = config_manager.get();
    apply_overrides(&mut config, &args, std::env::var(NEWS_API_KEY_ENV).ok());
    config
        .validate()
        .map_err(|e| anyhow!("설정 검증 실패: {e}"))?;

    // ── 어댑터 생성 (DI 와이어링) ──
    let feed = Arc::new(build_feed(&config, args.offline)?);

    let token_verifier = StaticTokenVerifier::from_config(&config.auth);
    if config.auth.enabled {
        info!("인증 게이트 활성화: 토큰 {}개", token_verifier.token_count());
    } else {
        info!("인증 게이트 비활성화: 익명 접근 허용");
    }
    let verifier: Arc<dyn SessionVerifier> = Arc::new(token_verifier);

    let server = WebServer::new(&config, feed, verifier);
    info!("API 서버: {}", server.url());

    // ── 라이프사이클 ──
    let lifecycle = Arc::new(LifecycleManager::new());
    let shutdown_rx = lifecycle.subscribe();
    let signal_lifecycle = Arc::clone(&lifecycle);
    tokio::spawn(async move {
        signal_lifecycle.wait_for_signal().await;
    });

    if let Err(e) = server.run(shutdown_rx).await {
        error!("API 서버 오류: {e}");
        lifecycle.shutdown();
        return Err(e.into());
    }

    info!("Haris News 서버 종료");
    Ok(())
}
