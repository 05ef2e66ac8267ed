//! Keyword triage of a free-text emergency description.
//!
//! Case-insensitive substring matching against fixed keyword sets, checked
//! in priority order; the first rule with any matching keyword wins. This is
//! a placeholder heuristic, kept exact for behavioural parity.

use serde::{Deserialize, Serialize};

use crate::models::{EmergencyType, Severity};

/// Category and urgency assigned to a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageOutcome {
    #[serde(rename = "type")]
    pub kind: EmergencyType,
    pub severity: Severity,
}

impl Default for TriageOutcome {
    fn default() -> Self {
        Self {
            kind: EmergencyType::General,
            severity: Severity::Moderate,
        }
    }
}

struct TriageRule {
    kind: EmergencyType,
    severity: Severity,
    keywords: &'static [&'static str],
}

// ── Keyword sets ────────────────────────────────────────────

static CARDIAC_KEYWORDS: &[&str] = &["chest pain", "heart", "cardiac", "breathing"];

static INJURY_KEYWORDS: &[&str] = &["injury", "bleeding", "accident", "fall", "broken"];

/// "breathing" also appears in the cardiac set, which is checked first.
static RESPIRATORY_KEYWORDS: &[&str] = &["breathing", "asthma", "cough", "oxygen"];

/// Generic distress words. Checked last and mapped to the same outcome as
/// the fallback, so they never change a classification on their own.
static GENERAL_KEYWORDS: &[&str] = &["emergency", "help", "urgent", "pain"];

// ── Rule registry ───────────────────────────────────────────

static RULES: &[TriageRule] = &[
    TriageRule {
        kind: EmergencyType::Cardiac,
        severity: Severity::Critical,
        keywords: CARDIAC_KEYWORDS,
    },
    TriageRule {
        kind: EmergencyType::Injury,
        severity: Severity::High,
        keywords: INJURY_KEYWORDS,
    },
    TriageRule {
        kind: EmergencyType::Respiratory,
        severity: Severity::High,
        keywords: RESPIRATORY_KEYWORDS,
    },
    TriageRule {
        kind: EmergencyType::General,
        severity: Severity::Moderate,
        keywords: GENERAL_KEYWORDS,
    },
];

/// Classify `transcript`; falls back to General Emergency / Moderate.
pub fn classify(transcript: &str) -> TriageOutcome {
    let lower = transcript.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lower.contains(k)))
        .map(|rule| TriageOutcome {
            kind: rule.kind,
            severity: rule.severity,
        })
        .unwrap_or_default()
}
