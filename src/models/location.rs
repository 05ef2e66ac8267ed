use serde::{Deserialize, Serialize};

pub const DEFAULT_CITY: &str = "Delhi";
pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_LATITUDE: f64 = 28.7041;
pub const DEFAULT_LONGITUDE: f64 = 77.1025;

/// A named place the surge prediction is requested for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Webhook responses may omit the country.
    #[serde(default)]
    pub country: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            city: DEFAULT_CITY.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl Location {
    /// "City, Country", or just the city when no country is known.
    pub fn display_name(&self) -> String {
        if self.country.is_empty() {
            self.city.clone()
        } else {
            format!("{}, {}", self.city, self.country)
        }
    }
}

/// Caller-supplied location where any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationQuery {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub country: Option<String>,
}

impl LocationQuery {
    /// Fill every missing (or blank) field from `defaults`.
    pub fn resolve(&self, defaults: &Location) -> Location {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Location {
            city: non_blank(&self.city).unwrap_or_else(|| defaults.city.clone()),
            latitude: self.latitude.unwrap_or(defaults.latitude),
            longitude: self.longitude.unwrap_or(defaults.longitude),
            country: non_blank(&self.country).unwrap_or_else(|| defaults.country.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_delhi() {
        let loc = Location::default();
        assert_eq!(loc.city, "Delhi");
        assert_eq!(loc.country, "India");
        assert_eq!(loc.latitude, 28.7041);
        assert_eq!(loc.longitude, 77.1025);
        assert_eq!(loc.display_name(), "Delhi, India");
    }

    #[test]
    fn empty_query_resolves_to_defaults() {
        let resolved = LocationQuery::default().resolve(&Location::default());
        assert_eq!(resolved, Location::default());
    }

    #[test]
    fn partial_query_keeps_supplied_fields() {
        let query = LocationQuery {
            city: Some("Pune".into()),
            latitude: Some(18.52),
            longitude: None,
            country: Some("   ".into()),
        };
        let resolved = query.resolve(&Location::default());
        assert_eq!(resolved.city, "Pune");
        assert_eq!(resolved.latitude, 18.52);
        assert_eq!(resolved.longitude, DEFAULT_LONGITUDE);
        assert_eq!(resolved.country, "India");
    }

    #[test]
    fn country_optional_on_deserialize() {
        let loc: Location =
            serde_json::from_str(r#"{"city":"Delhi","latitude":28.7,"longitude":77.1}"#).unwrap();
        assert!(loc.country.is_empty());
        assert_eq!(loc.display_name(), "Delhi");
    }
}
