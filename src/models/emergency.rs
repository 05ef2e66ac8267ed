use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{EmergencyType, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInfo {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
}

impl Default for PatientInfo {
    /// Demo profile shown in the patient portal.
    fn default() -> Self {
        Self {
            name: "Patient User".into(),
            age: 65,
            gender: "Male".into(),
            phone: "+91-XXXXXXXXXX".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub heart_rate: u32,
    pub blood_pressure: String,
    pub oxygen_level: u32,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            heart_rate: 82,
            blood_pressure: "140/90".into(),
            oxygen_level: 94,
        }
    }
}

/// Where the patient is, as reported to dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
}

impl PatientLocation {
    /// "lat, lng" as handed to the voice agent.
    pub fn coordinates(&self) -> String {
        format!("{}, {}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyDetails {
    #[serde(rename = "type")]
    pub kind: EmergencyType,
    pub description: String,
    pub severity: Severity,
    pub symptoms: Vec<String>,
    pub timestamp: DateTime<Utc>,
    pub voice_transcript: String,
}

/// Everything dispatch needs to act on a triaged emergency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRecord {
    pub patient_info: PatientInfo,
    pub emergency: EmergencyDetails,
    pub location: PatientLocation,
    pub vital_signs: VitalSigns,
    pub requested_service: String,
    pub ai_assessment: String,
}
