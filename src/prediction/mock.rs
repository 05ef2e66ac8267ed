use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{
    DepartmentImpact, EnvironmentalConditions, FetchMode, HistoricalComparison,
    HorizonPrediction, HorizonPredictions, Location, PredictionEnvelope, PredictionPayload,
};

pub const MOCK_NOTE: &str = "Mock data - webhook will provide real-time data";

/// The fixed payload served whenever the webhook cannot be used.
///
/// Every value except `location` is constant; tests and downstream
/// consumers match on these literals.
pub fn mock_prediction_payload(location: &Location) -> PredictionPayload {
    PredictionPayload {
        location: location.clone(),
        current_conditions: EnvironmentalConditions {
            temperature: 38.0,
            humidity: 65.0,
            aqi: 180,
            rainfall: 0.0,
            wind_speed: 15.0,
            uv_index: 8,
        },
        predictions: HorizonPredictions {
            next_24_hours: horizon(0.65, "120%", &["High Temperature", "Poor Air Quality"], "Moderate"),
            next_72_hours: horizon(0.78, "150%", &["Extreme Heat Wave", "Severe Pollution"], "High"),
            next_week: horizon(0.55, "80%", &["Festival Season", "Moderate Pollution"], "Moderate"),
        },
        department_wise_impact: departments(&[
            ("emergency", "200%", "Critical"),
            ("cardiology", "150%", "High"),
            ("pulmonology", "180%", "High"),
            ("pediatrics", "120%", "Moderate"),
            ("geriatrics", "160%", "High"),
        ]),
        recommendations: [
            "Increase emergency staff by 50% for next 72 hours",
            "Stock critical medications: respiratory, cardiac",
            "Prepare additional ICU beds (estimated +20 beds needed)",
            "Alert ambulance services for increased demand",
            "Setup outdoor triage for non-critical cases",
            "Coordinate with nearby hospitals for load balancing",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        historical_comparison: Some(HistoricalComparison {
            similar_conditions_past: "15 times in last 2 years".into(),
            average_surge_increase: "165%".into(),
            peak_hours: vec!["10 AM - 2 PM".into(), "6 PM - 10 PM".into()],
        }),
    }
}

/// Wrap the mock payload in a `mode: mock` envelope.
pub fn mock_envelope(location: &Location, fallback_reason: Option<String>) -> PredictionEnvelope {
    PredictionEnvelope {
        success: true,
        mode: FetchMode::Mock,
        data: mock_prediction_payload(location),
        processed_at: Utc::now(),
        note: Some(MOCK_NOTE.to_string()),
        fallback_reason,
    }
}

fn horizon(probability: f64, increase: &str, factors: &[&str], risk_level: &str) -> HorizonPrediction {
    HorizonPrediction {
        surge_probability: probability,
        expected_increase: increase.to_string(),
        primary_factors: factors.iter().map(|f| f.to_string()).collect(),
        risk_level: risk_level.to_string(),
    }
}

fn departments(rows: &[(&str, &str, &str)]) -> BTreeMap<String, DepartmentImpact> {
    rows.iter()
        .map(|(name, increase, level)| {
            (
                name.to_string(),
                DepartmentImpact {
                    expected_increase: increase.to_string(),
                    risk_level: level.to_string(),
                },
            )
        })
        .collect()
}
