use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::conditions::EnvironmentalConditions;
use super::enums::FetchMode;
use super::location::Location;

/// Forecast for one time horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HorizonPrediction {
    /// Probability in [0, 1].
    pub surge_probability: f64,
    pub expected_increase: String,
    #[serde(default)]
    pub primary_factors: Vec<String>,
    pub risk_level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonPredictions {
    #[serde(rename = "next24Hours")]
    pub next_24_hours: HorizonPrediction,
    #[serde(rename = "next72Hours")]
    pub next_72_hours: HorizonPrediction,
    #[serde(rename = "nextWeek")]
    pub next_week: HorizonPrediction,
}

impl HorizonPredictions {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &HorizonPrediction)> {
        [
            ("next24Hours", &self.next_24_hours),
            ("next72Hours", &self.next_72_hours),
            ("nextWeek", &self.next_week),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentImpact {
    pub expected_increase: String,
    pub risk_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoricalComparison {
    pub similar_conditions_past: String,
    pub average_surge_increase: String,
    pub peak_hours: Vec<String>,
}

/// Prediction body returned by the webhook (or the mock generator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionPayload {
    pub location: Location,
    pub current_conditions: EnvironmentalConditions,
    pub predictions: HorizonPredictions,
    #[serde(default)]
    pub department_wise_impact: BTreeMap<String, DepartmentImpact>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_comparison: Option<HistoricalComparison>,
}

/// Uniform result of a prediction fetch, live or mock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionEnvelope {
    pub success: bool,
    pub mode: FetchMode,
    pub data: PredictionPayload,
    pub processed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Why the live path was abandoned. Absent on live responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl PredictionEnvelope {
    pub fn is_mock(&self) -> bool {
        self.mode == FetchMode::Mock
    }

    /// Status string shown next to the dashboard header.
    pub fn status_line(&self) -> &'static str {
        match self.mode {
            FetchMode::Live => "Connected to live environmental data",
            FetchMode::Mock => "Using mock data: webhook unavailable",
        }
    }
}
