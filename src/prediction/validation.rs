use super::PredictionError;
use crate::models::PredictionPayload;

/// Decode and sanity-check a webhook response before any field is trusted.
///
/// Shape errors and out-of-range values are both `PredictionError::Schema`.
pub fn validate_payload(value: serde_json::Value) -> Result<PredictionPayload, PredictionError> {
    let payload: PredictionPayload =
        serde_json::from_value(value).map_err(|e| PredictionError::Schema(e.to_string()))?;

    let location = &payload.location;
    if !(-90.0..=90.0).contains(&location.latitude) {
        return Err(PredictionError::Schema(format!(
            "latitude out of range: {}",
            location.latitude
        )));
    }
    if !(-180.0..=180.0).contains(&location.longitude) {
        return Err(PredictionError::Schema(format!(
            "longitude out of range: {}",
            location.longitude
        )));
    }

    let conditions = &payload.current_conditions;
    if !conditions.is_finite() {
        return Err(PredictionError::Schema(
            "currentConditions contains a non-finite reading".into(),
        ));
    }
    if !(0.0..=100.0).contains(&conditions.humidity) {
        return Err(PredictionError::Schema(format!(
            "humidity out of range: {}",
            conditions.humidity
        )));
    }
    if conditions.rainfall < 0.0 {
        return Err(PredictionError::Schema(format!(
            "rainfall must not be negative: {}",
            conditions.rainfall
        )));
    }

    for (horizon, prediction) in payload.predictions.iter() {
        if !(0.0..=1.0).contains(&prediction.surge_probability) {
            return Err(PredictionError::Schema(format!(
                "{horizon}.surgeProbability out of range: {}",
                prediction.surge_probability
            )));
        }
    }

    Ok(payload)
}
