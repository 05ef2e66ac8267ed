//! Weather risk rules: map environmental threshold crossings to a
//! qualitative surge risk and a list of operational recommendations.
//!
//! Pure and deterministic. Every rule is checked independently against the
//! same readings; several may fire. The overall level only ever moves up.

use crate::models::{EnvironmentalConditions, RiskAssessment, RiskFactor, RiskLevel, Severity};

/// A hard-coded threshold rule.
struct RiskRule {
    factor: &'static str,
    severity: Severity,
    impact: &'static str,
    predicted_increase: &'static str,
    fires: fn(&EnvironmentalConditions) -> bool,
}

// ── Rule registry ───────────────────────────────────────────

/// Evaluation order: temperature, AQI, humidity, rainfall.
static RULES: &[RiskRule] = &[
    RiskRule {
        factor: "Extreme Heat",
        severity: Severity::High,
        impact: "Heat stroke, dehydration cases expected",
        predicted_increase: "150-200%",
        fires: |c| c.temperature > 40.0,
    },
    RiskRule {
        factor: "Extreme Cold",
        severity: Severity::High,
        impact: "Respiratory infections, hypothermia",
        predicted_increase: "120-150%",
        fires: |c| c.temperature < 5.0,
    },
    RiskRule {
        factor: "Severe Air Pollution",
        severity: Severity::Critical,
        impact: "Respiratory emergencies, cardiac issues",
        predicted_increase: "200-300%",
        fires: |c| c.aqi > 300,
    },
    RiskRule {
        factor: "Poor Air Quality",
        severity: Severity::Moderate,
        impact: "Asthma, COPD exacerbations",
        predicted_increase: "80-120%",
        fires: |c| c.aqi > 150 && c.aqi <= 300,
    },
    RiskRule {
        factor: "High Humidity",
        severity: Severity::Moderate,
        impact: "Fungal infections, breathing difficulties",
        predicted_increase: "40-60%",
        fires: |c| c.humidity > 85.0,
    },
    RiskRule {
        factor: "Heavy Rainfall",
        severity: Severity::High,
        impact: "Waterborne diseases, accidents, injuries",
        predicted_increase: "150-200%",
        fires: |c| c.rainfall > 100.0,
    },
];

// ── Advisories ──────────────────────────────────────────────

/// Advisories keyed by a substring of the risk factor name.
static ADVISORIES: &[(&str, &[&str])] = &[
    (
        "Heat",
        &[
            "Increase ICU capacity for heat-related emergencies",
            "Stock IV fluids and cooling equipment",
            "Alert geriatric and pediatric departments",
        ],
    ),
    (
        "Pollution",
        &[
            "Prepare additional oxygen supplies",
            "Staff pulmonology department adequately",
            "Setup outdoor triage for respiratory cases",
        ],
    ),
    (
        "Cold",
        &[
            "Increase emergency room capacity",
            "Stock antibiotics and respiratory medications",
            "Prepare warming equipment",
        ],
    ),
    (
        "Rainfall",
        &[
            "Prepare for trauma and injury cases",
            "Stock antibiotics for waterborne diseases",
            "Alert orthopedic and emergency departments",
        ],
    ),
];

/// Evaluate every rule against `conditions`.
pub fn analyze_weather_risks(conditions: &EnvironmentalConditions) -> RiskAssessment {
    let mut overall = RiskLevel::Low;
    let mut risks = Vec::new();

    for rule in RULES.iter().filter(|r| (r.fires)(conditions)) {
        overall = overall.max(RiskLevel::from(rule.severity));
        risks.push(RiskFactor {
            factor: rule.factor.to_string(),
            severity: rule.severity,
            impact: rule.impact.to_string(),
            predicted_increase: rule.predicted_increase.to_string(),
        });
    }

    tracing::debug!(
        overall = %overall,
        fired = risks.len(),
        "Weather risk analysis complete"
    );

    RiskAssessment {
        overall_risk_level: overall,
        total_risk_factors: risks.len(),
        recommended_actions: generate_recommendations(&risks),
        risks,
    }
}

/// Advisories for every fired risk, duplicates removed, first-seen order kept.
pub fn generate_recommendations(risks: &[RiskFactor]) -> Vec<String> {
    let mut actions: Vec<String> = Vec::new();

    for risk in risks {
        for (keyword, advisories) in ADVISORIES {
            if !risk.factor.contains(keyword) {
                continue;
            }
            for advisory in advisories.iter() {
                if !actions.iter().any(|a| a == advisory) {
                    actions.push(advisory.to_string());
                }
            }
        }
    }

    actions
}
