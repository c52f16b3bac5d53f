//! Render configuration.
//!
//! Settings that control how a scene is turned into pixels but are not part
//! of the scene itself. Can be built in code or parsed from JSON text, with
//! any missing field taking its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while loading or validating a [`RenderConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid render config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Default bucket edge length in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 16;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Recursion depth at which rays stop bouncing and return the background
    pub max_depth: u32,
    /// Distance secondary rays are pushed off a surface before tracing
    pub bias: f64,
    /// Edge length of the square tiles scheduled on the thread pool (1 = per pixel)
    pub bucket_size: u32,
    /// Seed for the anti-aliasing jitter; `None` draws fresh entropy each render
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            bias: 1e-4,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!("Loaded render config: {:?}", config);
        Ok(config)
    }

    /// Serialize the config to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_depth",
                reason: "must be at least 1".into(),
            });
        }
        if self.bucket_size == 0 {
            return Err(ConfigError::Invalid {
                field: "bucket_size",
                reason: "must be at least 1".into(),
            });
        }
        if !self.bias.is_finite() || self.bias <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "bias",
                reason: format!("must be a positive finite number, got {}", self.bias),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_default_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        init_logger();
        let config = RenderConfig::from_json_str(r#"{ "max_depth": 8, "seed": 7 }"#)
            .expect("valid config");

        assert_eq!(config.max_depth, 8);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.bucket_size, DEFAULT_BUCKET_SIZE);
        assert_eq!(config.bias, 1e-4);
    }

    #[test]
    fn test_json_round_trip() {
        let config = RenderConfig {
            bucket_size: 1,
            ..Default::default()
        };
        let json = config.to_json_string().expect("serializable");
        assert_eq!(RenderConfig::from_json_str(&json).expect("valid config"), config);
    }

    #[test]
    fn test_rejects_invalid_values() {
        init_logger();
        let err = RenderConfig::from_json_str(r#"{ "max_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "max_depth", .. }));

        let err = RenderConfig::from_json_str(r#"{ "bucket_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bucket_size", .. }));

        let err = RenderConfig::from_json_str(r#"{ "bias": -1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bias", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = RenderConfig::from_json_str("{ max_depth: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
