//! Configuration management for Limitless.

use serde::{Deserialize, Serialize};

use crate::error::{LimitlessError, Result};

/// Configuration for a rate limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimiterConfig {
    /// Maximum number of admissions per window
    pub calls: u32,

    /// Window length in seconds
    pub per_seconds: f64,

    /// Prefix namespacing keys, so limiters sharing a backend do not collide
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

fn default_key_prefix() -> String {
    "ratelimit".to_string()
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            calls: 1,
            per_seconds: 1.0,
            key_prefix: default_key_prefix(),
        }
    }
}

impl LimiterConfig {
    /// Create a configuration with the default key prefix.
    pub fn new(calls: u32, per_seconds: f64) -> Self {
        Self {
            calls,
            per_seconds,
            key_prefix: default_key_prefix(),
        }
    }

    /// Check the configuration for values that would make the limiter
    /// unusable. A zero call budget would never admit anything, so it is
    /// rejected here rather than surfacing as an infinite wait at call time.
    pub fn validate(&self) -> Result<()> {
        if self.calls == 0 {
            return Err(LimitlessError::Config(
                "calls must be a positive integer".to_string(),
            ));
        }
        if !(self.per_seconds > 0.0) {
            return Err(LimitlessError::Config(
                "per_seconds must be a positive number".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a YAML file path.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: LimiterConfig =
            serde_yaml::from_str(&contents).map_err(|e| LimitlessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_prefix() {
        let config = LimiterConfig::new(5, 1.0);
        assert_eq!(config.key_prefix, "ratelimit");
    }

    #[test]
    fn test_validate_accepts_positive_values() {
        assert!(LimiterConfig::new(1, 0.001).validate().is_ok());
        assert!(LimiterConfig::new(100, 3600.0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_calls() {
        let config = LimiterConfig::new(0, 1.0);
        assert!(matches!(
            config.validate(),
            Err(LimitlessError::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_window() {
        assert!(LimiterConfig::new(1, 0.0).validate().is_err());
        assert!(LimiterConfig::new(1, -1.0).validate().is_err());
        assert!(LimiterConfig::new(1, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_yaml_defaults_applied() {
        let config: LimiterConfig = serde_yaml::from_str("calls: 10\nper_seconds: 2.5\n").unwrap();
        assert_eq!(config.calls, 10);
        assert_eq!(config.per_seconds, 2.5);
        assert_eq!(config.key_prefix, "ratelimit");
    }

    #[test]
    fn test_yaml_explicit_prefix() {
        let yaml = "calls: 3\nper_seconds: 1\nkey_prefix: api\n";
        let config: LimiterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.key_prefix, "api");
    }
}
