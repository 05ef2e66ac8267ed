use chrono::{DateTime, Utc};
use serde::Serialize;

use super::client::{success_json, WebhookClient};
use super::gateway::AlertsGateway;
use super::mock::mock_envelope;
use super::validation::validate_payload;
use super::PredictionError;
use crate::config::ServiceConfig;
use crate::models::{FetchMode, Location, LocationQuery, PredictionEnvelope, PredictionPayload};

pub const ANALYSIS_TYPE: &str = "patient-surge-prediction";

// ═══════════════════════════════════════════════════════════
// Request payload
// ═══════════════════════════════════════════════════════════

/// Body POSTed to the webhook for a prediction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub timestamp: DateTime<Utc>,
    pub location: Location,
    pub data_request: DataRequest,
    pub analysis_type: &'static str,
    pub time_horizon: TimeHorizon,
}

/// Which data families the webhook should consider. All enabled.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    pub weather_factors: bool,
    pub pollution_factors: bool,
    pub epidemiological_data: bool,
    pub social_events: bool,
    pub historical_trends: bool,
}

impl Default for DataRequest {
    fn default() -> Self {
        Self {
            weather_factors: true,
            pollution_factors: true,
            epidemiological_data: true,
            social_events: true,
            historical_trends: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeHorizon {
    pub short_term: &'static str,
    pub medium_term: &'static str,
    pub long_term: &'static str,
}

impl Default for TimeHorizon {
    fn default() -> Self {
        Self {
            short_term: "24-72 hours",
            medium_term: "1-2 weeks",
            long_term: "1 month",
        }
    }
}

impl PredictionRequest {
    pub fn new(location: Location) -> Self {
        Self {
            timestamp: Utc::now(),
            location,
            data_request: DataRequest::default(),
            analysis_type: ANALYSIS_TYPE,
            time_horizon: TimeHorizon::default(),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// PredictionService
// ═══════════════════════════════════════════════════════════

/// Stateless prediction service. Every call fetches (or falls back) on its
/// own; nothing is cached, so concurrent and repeated calls are safe.
#[derive(Debug, Clone)]
pub struct PredictionService {
    config: ServiceConfig,
    client: WebhookClient,
}

impl PredictionService {
    pub fn new(config: ServiceConfig) -> Result<Self, PredictionError> {
        let client = WebhookClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Alerts/feedback/dispatch calls against the same endpoint.
    pub fn gateway(&self) -> AlertsGateway {
        AlertsGateway::new(self.client.clone())
    }

    /// Fetch a prediction for `query`, filling missing fields from the
    /// configured default location.
    ///
    /// Never fails: transport errors, non-2xx statuses, malformed JSON and
    /// schema violations all yield the mock envelope.
    pub async fn fetch_predictions(&self, query: &LocationQuery) -> PredictionEnvelope {
        let location = query.resolve(&self.config.default_location);

        tracing::info!(
            endpoint = %self.client.endpoint(),
            city = %location.city,
            "Fetching surge predictions"
        );

        match self.fetch_live(&location).await {
            Ok(data) => {
                tracing::info!(city = %location.city, "Live surge predictions received");
                PredictionEnvelope {
                    success: true,
                    mode: FetchMode::Live,
                    data,
                    processed_at: Utc::now(),
                    note: None,
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prediction webhook unavailable, serving mock data");
                mock_envelope(&location, Some(e.to_string()))
            }
        }
    }

    async fn fetch_live(&self, location: &Location) -> Result<PredictionPayload, PredictionError> {
        let request = PredictionRequest::new(location.clone());
        let response = self.client.post_json(&request).await?;
        let body = success_json(response).await?;
        validate_payload(body)
    }
}
