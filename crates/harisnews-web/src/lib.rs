//! # harisnews-web
//!
//! Haris News API 서버.
//! Axum 기반 JSON/SSE API.
//!
//! ## 기능
//! - 뉴스 피드 조회 (출처 필터, 폴백 표시)
//! - 페이지 뷰 단위 Web Vitals 수집 (비컨 엔트리 수신)
//! - 성능 리포트 및 SSE 실시간 스냅샷
//! - Bearer 토큰 인증 게이트

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod views;

use axum::routing::get;
use axum::{middleware, Router};
use harisnews_core::config::{AppConfig, WebConfig};
use harisnews_core::ports::session::SessionVerifier;
use harisnews_news::NewsFeed;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub use auth::StaticTokenVerifier;
pub use views::{PageView, PageViewRegistry};

/// 포트 바인드 최대 시도 횟수
const MAX_PORT_ATTEMPTS: u16 = 10;

/// 웹 서버 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    /// 뉴스 피드
    pub feed: Arc<NewsFeed>,
    /// 페이지 뷰 레지스트리
    pub views: Arc<PageViewRegistry>,
    /// 토큰 검증기
    pub verifier: Arc<dyn SessionVerifier>,
    /// SSE 재전송 주기
    pub refresh_interval: Duration,
    /// 종료 신호 (SSE 스트림 종료용)
    pub shutdown: watch::Receiver<bool>,
}

/// API 서버
pub struct WebServer {
    config: WebConfig,
    state: AppState,
}

impl WebServer {
    /// 새 웹 서버 생성
    pub fn new(config: &AppConfig, feed: Arc<NewsFeed>, verifier: Arc<dyn SessionVerifier>) -> Self {
        // 송신 측 없는 기본 채널: run() 전까지 스트림은 종료되지 않는다
        let (_, shutdown) = watch::channel(false);
        Self {
            config: config.web.clone(),
            state: AppState {
                feed,
                views: Arc::new(PageViewRegistry::new(config.vitals.clone())),
                verifier,
                refresh_interval: config.refresh_interval(),
                shutdown,
            },
        }
    }

    /// 애플리케이션 상태
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 라우터 구성 (테스트에서 직접 호출)
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// 서버 실행
    ///
    /// 기본 포트에서 시작하여, 포트가 이미 사용 중이면 다음 포트를 시도합니다.
    /// 최대 10개 포트를 시도한 후 실패하면 에러를 반환합니다.
    /// 종료 시 남은 페이지 뷰의 관찰자를 모두 정리합니다.
    pub async fn run(mut self, mut shutdown_rx: watch::Receiver<bool>) -> Result<(), std::io::Error> {
        let host = if self.config.allow_external {
            "0.0.0.0"
        } else {
            "127.0.0.1"
        };

        self.state.shutdown = shutdown_rx.clone();
        let views = Arc::clone(&self.state.views);
        let app = build_router(self.state);

        // 포트 바인드 시도 (최대 MAX_PORT_ATTEMPTS번)
        let base_port = self.config.port;
        let mut last_error = None;

        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);

            // 포트 오버플로우 체크
            if port < base_port && attempt > 0 {
                break;
            }

            let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
                Ok(a) => a,
                Err(e) => {
                    error!("잘못된 주소 {}:{}: {}", host, port, e);
                    continue;
                }
            };

            match TcpListener::bind(addr).await {
                Ok(listener) => {
                    if attempt > 0 {
                        warn!("포트 {} 사용 불가, 대체 포트 {} 사용", base_port, port);
                    }
                    info!("API 서버 시작: http://{}", addr);

                    axum::serve(listener, app)
                        .with_graceful_shutdown(async move {
                            loop {
                                if *shutdown_rx.borrow() {
                                    info!("웹 서버 종료 신호 수신");
                                    break;
                                }
                                if shutdown_rx.changed().await.is_err() {
                                    break;
                                }
                            }
                        })
                        .await?;

                    views.clear();
                    info!("API 서버 종료");
                    return Ok(());
                }
                Err(e) => {
                    // AddrInUse 에러인 경우 다음 포트 시도
                    if e.kind() == std::io::ErrorKind::AddrInUse {
                        warn!("포트 {} 이미 사용 중, 다음 포트 시도...", port);
                        last_error = Some(e);
                        continue;
                    }
                    return Err(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::AddrInUse,
                format!(
                    "포트 {}-{} 모두 사용 불가",
                    base_port,
                    base_port.saturating_add(MAX_PORT_ATTEMPTS - 1)
                ),
            )
        }))
    }

    /// 서버 URL 반환
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }
}

/// 전체 라우터: 헬스 체크 + `/api` + 인증 게이트 + CORS + HTTP 트레이스
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health))
        .nest("/api", routes::api_routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use harisnews_core::config::AuthConfig;

    fn server(config: &AppConfig) -> WebServer {
        WebServer::new(
            config,
            Arc::new(NewsFeed::offline()),
            Arc::new(StaticTokenVerifier::from_config(&AuthConfig::default())),
        )
    }

    #[test]
    fn web_server_url() {
        let server = server(&AppConfig::default_config());
        assert_eq!(server.url(), "http://localhost:3000");
    }

    #[test]
    fn state_follows_config() {
        let mut config = AppConfig::default_config();
        config.vitals.refresh_interval_ms = 1_500;
        let server = server(&config);
        assert_eq!(server.state().refresh_interval, Duration::from_millis(1_500));
        assert!(server.state().views.is_empty());
        assert!(server.state().feed.is_offline());
    }

    #[test]
    fn port_overflow_protection() {
        let base_port: u16 = 65530;
        for attempt in 0..MAX_PORT_ATTEMPTS {
            let port = base_port.saturating_add(attempt);
            assert!(port >= base_port || port == u16::MAX);
        }
    }

    #[tokio::test]
    async fn run_stops_on_shutdown_signal() {
        let mut config = AppConfig::default_config();
        config.web.port = 47_310;
        let server = server(&config);
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(server.run(rx));
        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();

        let result = tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .unwrap()
            .unwrap();
        assert!(result.is_ok());
    }
}
