use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value:?}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde uses the same string, so the wire form and `as_str` never drift.
/// Variants are listed in ascending order, which `Ord` follows.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(RiskLevel {
    Low => "Low",
    Moderate => "Moderate",
    High => "High",
    Critical => "Critical",
});

str_enum!(Severity {
    Moderate => "Moderate",
    High => "High",
    Critical => "Critical",
});

str_enum!(FetchMode {
    Live => "live",
    Mock => "mock",
});

str_enum!(EmergencyType {
    General => "General Emergency",
    Respiratory => "Respiratory Emergency",
    Injury => "Injury/Trauma",
    Cardiac => "Cardiac Emergency",
});

impl From<Severity> for RiskLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Moderate => RiskLevel::Moderate,
            Severity::High => RiskLevel::High,
            Severity::Critical => RiskLevel::Critical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn risk_level_round_trip() {
        for (variant, s) in [
            (RiskLevel::Low, "Low"),
            (RiskLevel::Moderate, "Moderate"),
            (RiskLevel::High, "High"),
            (RiskLevel::Critical, "Critical"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RiskLevel::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn risk_level_orders_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Moderate);
        assert!(RiskLevel::Moderate < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
    }

    #[test]
    fn severity_maps_onto_risk_level() {
        assert_eq!(RiskLevel::from(Severity::Moderate), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from(Severity::High), RiskLevel::High);
        assert_eq!(RiskLevel::from(Severity::Critical), RiskLevel::Critical);
    }

    #[test]
    fn fetch_mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FetchMode::Mock).unwrap(), "\"mock\"");
        assert_eq!(serde_json::to_string(&FetchMode::Live).unwrap(), "\"live\"");
    }

    #[test]
    fn emergency_type_uses_display_labels() {
        assert_eq!(EmergencyType::Injury.to_string(), "Injury/Trauma");
        let parsed: EmergencyType = serde_json::from_str("\"Cardiac Emergency\"").unwrap();
        assert_eq!(parsed, EmergencyType::Cardiac);
    }

    #[test]
    fn unknown_value_rejected() {
        let err = RiskLevel::from_str("Severe").unwrap_err();
        assert_eq!(err.field, "RiskLevel");
        assert_eq!(err.value, "Severe");
        assert!(serde_json::from_str::<Severity>("\"low\"").is_err());
    }
}
