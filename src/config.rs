use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Location;

/// Application-level constants
pub const APP_NAME: &str = "Surgecast";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default webhook target: a local n8n instance.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:5678/webhook/patient-surge-prediction";

/// Dashboard refresh cadence: every 30 minutes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 30 * 60;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "surgecast_lib=info,surgecast=info,warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Endpoint URL must not be empty")]
    EmptyEndpoint,

    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime configuration for the prediction service.
///
/// Passed into `PredictionService::new` at construction time; nothing in the
/// crate reads the endpoint from process-wide state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// Webhook the prediction requests are POSTed to.
    pub endpoint_url: String,
    /// Location used when the caller supplies none, and for geolocation fallback.
    pub default_location: Location,
    /// `None` leaves the HTTP client's own default in place, as does
    /// `request_timeout_secs`.
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub refresh_interval_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT_URL.to_string(),
            default_location: Location::default(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
        }
    }
}

impl ServiceConfig {
    /// Config pointing at a specific endpoint, everything else default.
    pub fn with_endpoint(endpoint_url: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.endpoint_url = normalize_endpoint(endpoint_url)?;
        Ok(config)
    }

    /// Defaults overridden by `SURGECAST_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("SURGECAST_WEBHOOK_URL") {
            config.endpoint_url = normalize_endpoint(&url)?;
        }
        if let Some(city) = lookup("SURGECAST_DEFAULT_CITY") {
            config.default_location.city = city;
        }
        if let Some(country) = lookup("SURGECAST_DEFAULT_COUNTRY") {
            config.default_location.country = country;
        }
        if let Some(lat) = parse_var(&lookup, "SURGECAST_DEFAULT_LAT")? {
            config.default_location.latitude = lat;
        }
        if let Some(lng) = parse_var(&lookup, "SURGECAST_DEFAULT_LNG")? {
            config.default_location.longitude = lng;
        }
        if let Some(secs) = parse_var(&lookup, "SURGECAST_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout_secs = Some(secs);
        }
        if let Some(secs) = parse_var(&lookup, "SURGECAST_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout_secs = Some(secs);
        }
        if let Some(secs) = parse_var::<_, u64>(&lookup, "SURGECAST_REFRESH_SECS")? {
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "SURGECAST_REFRESH_SECS",
                    value: "0".into(),
                });
            }
            config.refresh_interval_secs = secs;
        }

        Ok(config)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

fn normalize_endpoint(url: &str) -> Result<String, ConfigError> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyEndpoint);
    }
    Ok(trimmed.to_string())
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_webhook() {
        let config = ServiceConfig::default();
        assert_eq!(config.endpoint_url, DEFAULT_ENDPOINT_URL);
        assert_eq!(config.default_location.city, "Delhi");
        assert_eq!(config.refresh_interval(), Duration::from_secs(1800));
        assert!(config.connect_timeout().is_none());
        assert!(config.request_timeout().is_none());
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
    }

    #[test]
    fn env_overrides_applied() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("SURGECAST_WEBHOOK_URL", "https://hooks.example.org/surge/"),
            ("SURGECAST_DEFAULT_CITY", "Mumbai"),
            ("SURGECAST_DEFAULT_LAT", "19.076"),
            ("SURGECAST_DEFAULT_LNG", "72.8777"),
            ("SURGECAST_CONNECT_TIMEOUT_SECS", "5"),
            ("SURGECAST_REQUEST_TIMEOUT_SECS", "30"),
            ("SURGECAST_REFRESH_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.endpoint_url, "https://hooks.example.org/surge");
        assert_eq!(config.default_location.city, "Mumbai");
        assert_eq!(config.default_location.country, "India");
        assert!((config.default_location.latitude - 19.076).abs() < f64::EPSILON);
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[test]
    fn invalid_number_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[(
            "SURGECAST_CONNECT_TIMEOUT_SECS",
            "soon",
        )]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                var: "SURGECAST_CONNECT_TIMEOUT_SECS",
                value: "soon".into()
            }
        );
    }

    #[test]
    fn zero_refresh_interval_rejected() {
        let result = ServiceConfig::from_lookup(lookup_from(&[("SURGECAST_REFRESH_SECS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn blank_endpoint_rejected() {
        assert_eq!(
            ServiceConfig::with_endpoint("  / ").unwrap_err(),
            ConfigError::EmptyEndpoint
        );
    }

    #[test]
    fn app_name_is_surgecast() {
        assert_eq!(APP_NAME, "Surgecast");
    }
}
