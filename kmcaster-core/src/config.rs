//! Configuration
//!
//! Settings that shape how models dispatch changes. Loaded from JSON; every
//! field has a default so an empty object (`{}`) is a valid configuration.
//!
//! ```rust,ignore
//! let config = Config::from_json(r#"{ "failure_policy": "abort" }"#)?;
//! let models = InputModels::with_config(&config);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What a dispatcher does when an observer returns an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log the failure and keep delivering to the remaining observers.
    #[default]
    Continue,

    /// Stop delivering and return the failure to the caller.
    Abort,
}

/// Overlay model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Policy applied by every dispatcher built from this configuration.
    pub failure_policy: FailurePolicy,

    /// Upper bound for the repeated-key counter.
    pub max_repeat_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Continue,
            max_repeat_count: 99,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_repeat_count == 0 {
            return Err(ConfigError::ZeroRepeatLimit);
        }
        Ok(())
    }
}
