use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Location, PatientLocation};

/// A position reported by the device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Metres.
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location access denied by user")]
    PermissionDenied,

    #[error("Location information unavailable")]
    PositionUnavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Geolocation is not supported by your browser")]
    Unsupported,
}

/// Turn a geolocation outcome into a dispatch location. Never fails: any
/// error yields `fallback` with a "City, Country" address.
pub fn resolve_patient_location(
    fix: Result<PositionFix, LocationError>,
    fallback: &Location,
) -> PatientLocation {
    match fix {
        Ok(fix) => PatientLocation {
            latitude: fix.latitude,
            longitude: fix.longitude,
            address: "Current Location".into(),
        },
        Err(e) => {
            tracing::info!(reason = %e, "Location unavailable, using default location");
            PatientLocation {
                latitude: fallback.latitude,
                longitude: fallback.longitude,
                address: fallback.display_name(),
            }
        }
    }
}
