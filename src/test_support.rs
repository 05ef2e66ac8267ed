//! Shared helpers for tests that need a stand-in prediction webhook.

use axum::Router;

use crate::config::ServiceConfig;
use crate::prediction::PredictionService;

pub const WEBHOOK_PATH: &str = "/webhook/patient-surge-prediction";

/// Serve `router` on an ephemeral localhost port; returns the webhook URL.
pub async fn spawn_webhook(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}{WEBHOOK_PATH}")
}

/// A webhook URL on a port nothing listens on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}{WEBHOOK_PATH}")
}

pub fn service_for(url: &str) -> PredictionService {
    PredictionService::new(ServiceConfig::with_endpoint(url).unwrap()).unwrap()
}
