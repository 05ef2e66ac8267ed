use serde::{Deserialize, Serialize};

/// Environmental readings for a location at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentalConditions {
    /// Degrees Celsius.
    pub temperature: f64,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub aqi: u32,
    /// Millimetres.
    pub rainfall: f64,
    /// km/h.
    pub wind_speed: f64,
    pub uv_index: u32,
}

impl EnvironmentalConditions {
    /// Every float reading is a finite number.
    pub fn is_finite(&self) -> bool {
        [self.temperature, self.humidity, self.rainfall, self.wind_speed]
            .iter()
            .all(|v| v.is_finite())
    }
}
