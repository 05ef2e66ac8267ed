use serde::{Deserialize, Serialize};

use super::enums::{RiskLevel, Severity};

/// One environmental threshold that was crossed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: String,
    pub severity: Severity,
    pub impact: String,
    /// Percent range, e.g. "150-200%".
    pub predicted_increase: String,
}

/// Output of the risk rule engine for one set of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    /// In rule evaluation order, not sorted by severity.
    pub risks: Vec<RiskFactor>,
    pub total_risk_factors: usize,
    /// Deduplicated, first-seen order.
    pub recommended_actions: Vec<String>,
}

impl RiskAssessment {
    pub fn is_clear(&self) -> bool {
        self.risks.is_empty()
    }
}
