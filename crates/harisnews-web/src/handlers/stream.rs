//! SSE 실시간 스트림 핸들러.

use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use harisnews_core::models::metrics::PerformanceMetrics;
use harisnews_vitals::scorer;
use serde::Serialize;
use std::convert::Infallible;
use std::future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::{IntervalStream, UnboundedReceiverStream};
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

/// 스냅샷 업데이트 이벤트
#[derive(Debug, Clone, Serialize)]
pub struct VitalsUpdate {
    /// 페이지 뷰 ID
    pub view_id: String,
    /// 최신 지표
    pub metrics: PerformanceMetrics,
    /// 종합 점수
    pub score: u8,
}

impl VitalsUpdate {
    fn new(view_id: &str, metrics: PerformanceMetrics) -> Self {
        Self {
            view_id: view_id.to_string(),
            score: scorer::score(&metrics),
            metrics,
        }
    }
}

/// SSE 스트림 엔드포인트
///
/// GET /api/vitals/views/{id}/stream
///
/// 스냅샷이 바뀔 때마다 `metrics` 이벤트를 보내고, 변화가 없어도
/// 갱신 주기마다 현재 스냅샷을 다시 보낸다. 연결이 끊기면 구독 핸들이
/// 해제된다.
pub async fn vitals_stream(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let view = state.views.get(&id)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let handle = view.subscribe(Arc::new(move |metrics: &PerformanceMetrics| {
        // 수신 측이 끊긴 경우 전송 실패는 무시
        let _ = tx.send(*metrics);
    }))?;
    debug!("SSE 구독 시작: {id}");

    let updates = UnboundedReceiverStream::new(rx);
    // 첫 tick은 즉시 발생하므로 현재 스냅샷이 바로 전송된다
    let ticks = IntervalStream::new(tokio::time::interval(state.refresh_interval))
        .map(move |_| handle.snapshot());

    let view_id = id;
    let events = stream::select(updates, ticks)
        .map(move |metrics| VitalsUpdate::new(&view_id, metrics))
        .filter_map(|update| {
            future::ready(
                serde_json::to_string(&update)
                    .ok()
                    .map(|json| Ok(Event::default().event("metrics").data(json))),
            )
        })
        .take_until(wait_for_shutdown(state.shutdown.clone()));

    Ok(Sse::new(events).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    ))
}

/// 종료 신호 대기 (송신 측이 사라지면 영원히 대기)
async fn wait_for_shutdown(mut shutdown_rx: watch::Receiver<bool>) {
    loop {
        if *shutdown_rx.borrow() {
            return;
        }
        if shutdown_rx.changed().await.is_err() {
            future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_update() {
        let update = VitalsUpdate::new(
            "view-1",
            PerformanceMetrics {
                lcp: Some(2100.0),
                ..Default::default()
            },
        );
        let json = serde_json::to_string(&update).unwrap();
        assert!(json.contains("\"view_id\":\"view-1\""));
        assert!(json.contains("\"lcp\":2100.0"));
        assert!(json.contains("\"score\":100"));
    }

    #[tokio::test]
    async fn shutdown_signal_resolves_wait() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));
        tx.send(true).unwrap();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn dropped_sender_never_resolves() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let result = tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(rx)).await;
        assert!(result.is_err());
    }
}
