//! Periodic prediction refresh.
//!
//! Runs `fetch_predictions` on a tokio interval and publishes every envelope
//! on a watch channel. The first fetch happens immediately. The handle owns
//! the task: `shutdown()` (or dropping the handle) stops it, including a
//! fetch that is still in flight.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{oneshot, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::fetcher::PredictionService;
use crate::models::{LocationQuery, PredictionEnvelope};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefreshError {
    #[error("Refresh interval must be greater than zero")]
    ZeroInterval,
}

/// Handle for a running refresh task.
pub struct RefreshHandle {
    latest: watch::Receiver<Option<PredictionEnvelope>>,
    trigger: Arc<Notify>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Most recent envelope, if any fetch has completed.
    pub fn latest(&self) -> Option<PredictionEnvelope> {
        self.latest.borrow().clone()
    }

    /// Receiver that is notified on every completed fetch.
    pub fn subscribe(&self) -> watch::Receiver<Option<PredictionEnvelope>> {
        self.latest.clone()
    }

    /// Fetch now without waiting for the next tick.
    pub fn refresh_now(&self) {
        self.trigger.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Request shutdown. Idempotent.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Prediction refresh shutdown signal sent");
        }
    }

    /// Shut down and wait for the task to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Start refreshing predictions for `query` every `interval`.
///
/// Must be called from within a tokio runtime. A zero interval is rejected
/// before anything is spawned.
pub fn spawn_refresh(
    service: Arc<PredictionService>,
    query: LocationQuery,
    interval: Duration,
) -> Result<RefreshHandle, RefreshError> {
    if interval.is_zero() {
        return Err(RefreshError::ZeroInterval);
    }

    let (latest_tx, latest_rx) = watch::channel(None);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let trigger = Arc::new(Notify::new());

    let task = tokio::spawn(refresh_loop(
        service,
        query,
        interval,
        latest_tx,
        trigger.clone(),
        shutdown_rx,
    ));

    Ok(RefreshHandle {
        latest: latest_rx,
        trigger,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

async fn refresh_loop(
    service: Arc<PredictionService>,
    query: LocationQuery,
    interval: Duration,
    latest_tx: watch::Sender<Option<PredictionEnvelope>>,
    trigger: Arc<Notify>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    tracing::info!(interval_secs = interval.as_secs(), "Prediction refresh started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => break,
            _ = ticker.tick() => {}
            _ = trigger.notified() => {}
        }

        let envelope = tokio::select! {
            _ = &mut shutdown_rx => break,
            envelope = service.fetch_predictions(&query) => envelope,
        };

        tracing::debug!(mode = %envelope.mode, "Prediction refresh completed");
        latest_tx.send_replace(Some(envelope));
    }

    tracing::info!("Prediction refresh shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FetchMode;
    use crate::test_support::{service_for, spawn_webhook, WEBHOOK_PATH};
    use axum::{http::StatusCode, routing::post, Router};
    use std::sync::atomic::{AtomicUsize, Ordering};

    const HOUR: Duration = Duration::from_secs(3600);

    async fn counting_webhook(hits: Arc<AtomicUsize>) -> String {
        spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            post(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    StatusCode::SERVICE_UNAVAILABLE
                }
            }),
        ))
        .await
    }

    #[tokio::test]
    async fn first_fetch_runs_immediately() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = counting_webhook(hits.clone()).await;
        let handle =
            spawn_refresh(Arc::new(service_for(&url)), LocationQuery::default(), HOUR).unwrap();

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();

        let envelope = handle.latest().unwrap();
        assert_eq!(envelope.mode, FetchMode::Mock);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test]
    async fn refresh_now_triggers_another_fetch() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = counting_webhook(hits.clone()).await;
        let handle =
            spawn_refresh(Arc::new(service_for(&url)), LocationQuery::default(), HOUR).unwrap();

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        handle.refresh_now();
        rx.changed().await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 2);
        handle.stop().await;
    }

    #[tokio::test]
    async fn stop_closes_the_channel() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = counting_webhook(hits).await;
        let handle =
            spawn_refresh(Arc::new(service_for(&url)), LocationQuery::default(), HOUR).unwrap();

        let mut rx = handle.subscribe();
        rx.changed().await.unwrap();
        handle.stop().await;

        assert!(rx.changed().await.is_err());
    }

    #[tokio::test]
    async fn zero_interval_rejected_without_fetching() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = counting_webhook(hits.clone()).await;
        let result = spawn_refresh(
            Arc::new(service_for(&url)),
            LocationQuery::default(),
            Duration::ZERO,
        );

        assert_eq!(result.err(), Some(RefreshError::ZeroInterval));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let hits = Arc::new(AtomicUsize::new(0));
        let url = counting_webhook(hits).await;
        let mut handle =
            spawn_refresh(Arc::new(service_for(&url)), LocationQuery::default(), HOUR).unwrap();
        handle.shutdown();
        handle.shutdown();
        handle.stop().await;
    }
}
