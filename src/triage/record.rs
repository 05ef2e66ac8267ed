use chrono::Utc;

use super::classify::{classify, TriageOutcome};
use crate::models::{
    EmergencyDetails, EmergencyRecord, PatientInfo, PatientLocation, VitalSigns,
};

pub const REQUESTED_SERVICE: &str = "Ambulance";

/// One-line assessment shown to dispatch and read to the voice agent.
pub fn ai_assessment(outcome: &TriageOutcome) -> String {
    format!(
        "{} emergency detected. {} identified from voice analysis.",
        outcome.severity, outcome.kind
    )
}

/// Classify a finalized transcript and package it for dispatch.
pub fn build_emergency_record(
    transcript: &str,
    patient: PatientInfo,
    location: PatientLocation,
    vitals: VitalSigns,
) -> EmergencyRecord {
    let outcome = classify(transcript);
    tracing::info!(
        emergency_type = %outcome.kind,
        severity = %outcome.severity,
        "Emergency triaged from transcript"
    );

    EmergencyRecord {
        patient_info: patient,
        emergency: EmergencyDetails {
            kind: outcome.kind,
            description: transcript.to_string(),
            severity: outcome.severity,
            symptoms: vec![transcript.to_string()],
            timestamp: Utc::now(),
            voice_transcript: transcript.to_string(),
        },
        location,
        vital_signs: vitals,
        requested_service: REQUESTED_SERVICE.to_string(),
        ai_assessment: ai_assessment(&outcome),
    }
}
