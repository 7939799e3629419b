//! Balance and tuning constants for the progression engine.
//!
//! Defaults reproduce the shipped game. A host page may override any subset
//! by handing a JSON object to [`EngineConfig::from_json`]; missing fields
//! keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Cadence of passive generation.
    pub auto_gen_interval_ms: f64,
    /// Taps closer together than this earn the burst bonus.
    pub burst_window_ms: f64,
    pub burst_multiplier: f64,
    /// Experience needed per level: level N requires N × this.
    pub exp_per_level: u64,
    /// Oldest notifications are dropped beyond this many.
    pub notification_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_gen_interval_ms: 1000.0,
            burst_window_ms: 200.0,
            burst_multiplier: 1.1,
            exp_per_level: 100,
            notification_limit: 50,
        }
    }
}

impl EngineConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.auto_gen_interval_ms > 0.0) {
            return Err(ConfigError::Invalid {
                field: "autoGenIntervalMs",
                reason: "must be positive",
            });
        }
        if !(self.burst_window_ms >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "burstWindowMs",
                reason: "must not be negative",
            });
        }
        if !(self.burst_multiplier >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "burstMultiplier",
                reason: "must be at least 1.0",
            });
        }
        // A zero requirement would make the level-up loop spin forever.
        if self.exp_per_level == 0 {
            return Err(ConfigError::Invalid {
                field: "expPerLevel",
                reason: "must be positive",
            });
        }
        if self.notification_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "notificationLimit",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.auto_gen_interval_ms - 1000.0).abs() < f64::EPSILON);
        assert!((config.burst_window_ms - 200.0).abs() < f64::EPSILON);
        assert!((config.burst_multiplier - 1.1).abs() < f64::EPSILON);
        assert_eq!(config.exp_per_level, 100);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"expPerLevel": 250}"#).unwrap();
        assert_eq!(config.exp_per_level, 250);
        assert!((config.auto_gen_interval_ms - 1000.0).abs() < f64::EPSILON);
        assert_eq!(config.notification_limit, 50);
    }

    #[test]
    fn empty_object_is_default() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_exp_per_level_rejected() {
        let err = EngineConfig::from_json(r#"{"expPerLevel": 0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "expPerLevel",
                ..
            }
        ));
    }

    #[test]
    fn non_positive_interval_rejected() {
        let err = EngineConfig::from_json(r#"{"autoGenIntervalMs": 0}"#).unwrap_err();
        assert!(err.to_string().contains("autoGenIntervalMs"));
    }

    #[test]
    fn burst_multiplier_below_one_rejected() {
        assert!(EngineConfig::from_json(r#"{"burstMultiplier": 0.5}"#).is_err());
    }

    #[test]
    fn zero_notification_limit_rejected() {
        assert!(EngineConfig::from_json(r#"{"notificationLimit": 0}"#).is_err());
    }
}
