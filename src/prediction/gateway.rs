use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::client::{any_json, success_json, WebhookClient};
use super::PredictionError;
use crate::models::EmergencyRecord;

// ═══════════════════════════════════════════════════════════
// Wire types
// ═══════════════════════════════════════════════════════════

/// Result of an alerts lookup. Failures are reported, not replaced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurgeAlerts {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default)]
    pub alerts: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

impl SurgeAlerts {
    fn failed(error: &PredictionError) -> Self {
        Self {
            success: false,
            alerts: Vec::new(),
            error: Some(error.to_string()),
        }
    }
}

/// `{ success: false, error }` as returned by a failed gateway call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayFailure {
    pub success: bool,
    pub error: String,
}

/// Reply to a one-shot POST: the webhook's JSON as-is, or a failure object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GatewayReply {
    Accepted(serde_json::Value),
    Failed(GatewayFailure),
}

impl GatewayReply {
    fn failed(error: &PredictionError) -> Self {
        Self::Failed(GatewayFailure {
            success: false,
            error: error.to_string(),
        })
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackRequest<'a> {
    prediction_id: &'a str,
    actual_data: &'a serde_json::Value,
    timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct EmergencyDispatch<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    emergency: &'a EmergencyRecord,
    timestamp: DateTime<Utc>,
}

// ═══════════════════════════════════════════════════════════
// AlertsGateway
// ═══════════════════════════════════════════════════════════

/// One-shot calls against the prediction endpoint family. Unlike the
/// fetcher these never substitute mock data.
#[derive(Debug, Clone)]
pub struct AlertsGateway {
    client: WebhookClient,
}

impl AlertsGateway {
    pub fn new(client: WebhookClient) -> Self {
        Self { client }
    }

    /// `GET <endpoint>?type=alerts&hospitalId=<id>`.
    pub async fn get_surge_alerts(&self, hospital_id: &str) -> SurgeAlerts {
        match self.fetch_alerts(hospital_id).await {
            Ok(alerts) => alerts,
            Err(e) => {
                tracing::warn!(hospital_id, error = %e, "Error fetching surge alerts");
                SurgeAlerts::failed(&e)
            }
        }
    }

    async fn fetch_alerts(&self, hospital_id: &str) -> Result<SurgeAlerts, PredictionError> {
        let response = self
            .client
            .get_with_query(&[("type", "alerts"), ("hospitalId", hospital_id)])
            .await?;
        match success_json(response).await? {
            serde_json::Value::Array(alerts) => Ok(SurgeAlerts {
                success: true,
                alerts,
                error: None,
            }),
            body => serde_json::from_value(body).map_err(|e| PredictionError::Schema(e.to_string())),
        }
    }

    /// Report how a prediction compared with what actually happened.
    ///
    /// The response body is passed through whatever its status; only
    /// transport and parse failures become `GatewayReply::Failed`.
    pub async fn submit_prediction_feedback(
        &self,
        prediction_id: &str,
        actual_data: &serde_json::Value,
    ) -> GatewayReply {
        let feedback = FeedbackRequest {
            prediction_id,
            actual_data,
            timestamp: Utc::now(),
            kind: "accuracy-feedback",
        };
        match self.post_passthrough(&feedback).await {
            Ok(body) => GatewayReply::Accepted(body),
            Err(e) => {
                tracing::warn!(prediction_id, error = %e, "Error submitting feedback");
                GatewayReply::failed(&e)
            }
        }
    }

    /// Hand a triaged emergency to the automation backend.
    pub async fn submit_emergency(&self, record: &EmergencyRecord) -> GatewayReply {
        let dispatch = EmergencyDispatch {
            kind: "emergency-dispatch",
            emergency: record,
            timestamp: Utc::now(),
        };
        tracing::info!(
            emergency_type = %record.emergency.kind,
            severity = %record.emergency.severity,
            "Dispatching emergency"
        );
        match self.post_passthrough(&dispatch).await {
            Ok(body) => GatewayReply::Accepted(body),
            Err(e) => {
                tracing::error!(error = %e, "Emergency dispatch failed");
                GatewayReply::failed(&e)
            }
        }
    }

    async fn post_passthrough<B: Serialize>(&self, body: &B) -> Result<serde_json::Value, PredictionError> {
        let response = self.client.post_json(body).await?;
        any_json(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyType, PatientInfo, PatientLocation, VitalSigns};
    use crate::test_support::{service_for, spawn_webhook, unreachable_endpoint, WEBHOOK_PATH};
    use crate::triage::build_emergency_record;
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn alerts_sends_query_and_returns_body() {
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            get(|Query(params): Query<HashMap<String, String>>| async move {
                Json(json!({
                    "success": true,
                    "alerts": [{
                        "type": params.get("type"),
                        "hospitalId": params.get("hospitalId"),
                        "level": "High"
                    }]
                }))
            }),
        ))
        .await;

        let alerts = service_for(&url).gateway().get_surge_alerts("AIIMS-01").await;
        assert!(alerts.success);
        assert!(alerts.error.is_none());
        assert_eq!(alerts.alerts.len(), 1);
        assert_eq!(alerts.alerts[0]["type"], "alerts");
        assert_eq!(alerts.alerts[0]["hospitalId"], "AIIMS-01");
    }

    #[tokio::test]
    async fn alerts_accepts_bare_array() {
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            get(|| async { Json(json!([{"level": "Critical"}, {"level": "Moderate"}])) }),
        ))
        .await;

        let alerts = service_for(&url).gateway().get_surge_alerts("H1").await;
        assert!(alerts.success);
        assert_eq!(alerts.alerts.len(), 2);
    }

    #[tokio::test]
    async fn alerts_failure_is_reported() {
        let url = unreachable_endpoint().await;
        let alerts = service_for(&url).gateway().get_surge_alerts("H1").await;
        assert!(!alerts.success);
        assert!(alerts.alerts.is_empty());
        assert!(alerts.error.unwrap().contains("not reachable"));
    }

    #[tokio::test]
    async fn alerts_non_success_status_is_reported() {
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            get(|| async { StatusCode::NOT_FOUND }),
        ))
        .await;
        let alerts = service_for(&url).gateway().get_surge_alerts("H1").await;
        assert_eq!(
            serde_json::to_value(&alerts).unwrap(),
            json!({"success": false, "alerts": [], "error": "HTTP error! status: 404"})
        );
    }

    #[tokio::test]
    async fn feedback_posts_envelope_and_passes_reply_through() {
        let received: Arc<Mutex<Vec<Value>>> = Arc::default();
        let seen = received.clone();
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    (StatusCode::ACCEPTED, Json(json!({"success": true, "stored": 1})))
                }
            }),
        ))
        .await;

        let reply = service_for(&url)
            .gateway()
            .submit_prediction_feedback("pred-42", &json!({"actualIncrease": "140%"}))
            .await;
        assert_eq!(reply, GatewayReply::Accepted(json!({"success": true, "stored": 1})));

        let requests = received.lock().unwrap();
        assert_eq!(requests[0]["predictionId"], "pred-42");
        assert_eq!(requests[0]["type"], "accuracy-feedback");
        assert_eq!(requests[0]["actualData"]["actualIncrease"], "140%");
        assert!(requests[0]["timestamp"].is_string());
    }

    #[tokio::test]
    async fn feedback_error_status_with_json_body_is_passed_through() {
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"message": "Error in workflow"})),
                )
            }),
        ))
        .await;
        let reply = service_for(&url)
            .gateway()
            .submit_prediction_feedback("pred-1", &json!({}))
            .await;
        assert!(reply.is_accepted());
    }

    #[tokio::test]
    async fn feedback_transport_failure_is_structured() {
        let url = unreachable_endpoint().await;
        let reply = service_for(&url)
            .gateway()
            .submit_prediction_feedback("pred-1", &json!({}))
            .await;
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("not reachable"));
    }

    #[tokio::test]
    async fn emergency_dispatch_carries_record() {
        let received: Arc<Mutex<Vec<Value>>> = Arc::default();
        let seen = received.clone();
        let url = spawn_webhook(Router::new().route(
            WEBHOOK_PATH,
            post(move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({"dispatched": true}))
                }
            }),
        ))
        .await;

        let record = build_emergency_record(
            "I have chest pain",
            PatientInfo::default(),
            PatientLocation {
                latitude: 28.7041,
                longitude: 77.1025,
                address: "Delhi, India".into(),
            },
            VitalSigns::default(),
        );
        assert_eq!(record.emergency.kind, EmergencyType::Cardiac);

        let reply = service_for(&url).gateway().submit_emergency(&record).await;
        assert!(reply.is_accepted());

        let requests = received.lock().unwrap();
        assert_eq!(requests[0]["type"], "emergency-dispatch");
        assert_eq!(requests[0]["emergency"]["emergency"]["type"], "Cardiac Emergency");
        assert_eq!(requests[0]["emergency"]["requestedService"], "Ambulance");
    }
}
