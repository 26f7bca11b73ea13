//! Process-wide switches consulted by builders at `build()` time.
//!
//! The defaults enforce every check. Hosts that ingest legacy data can relax
//! individual checks by installing a different [`ModelConfig`]:
//!
//! ```rust
//! use atrius_fhir_model::ModelConfig;
//!
//! let relaxed = ModelConfig::from_json_str(r#"{ "checkReferenceTypes": false }"#).unwrap();
//! assert!(!relaxed.check_reference_types);
//! assert!(relaxed.check_control_chars);
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CHECK_REFERENCE_TYPES_ENV: &str = "ATRIUS_MODEL_CHECK_REFERENCE_TYPES";
pub const CHECK_CONTROL_CHARS_ENV: &str = "ATRIUS_MODEL_CHECK_CONTROL_CHARS";

static CURRENT: Lazy<RwLock<Arc<ModelConfig>>> =
    Lazy::new(|| RwLock::new(Arc::new(ModelConfig::default())));

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid model configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value '{value}' for {var}: expected true, false, 1 or 0")]
    InvalidEnv { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelConfig {
    /// Reject literal references (`Type/id`) naming a resource type the field does not allow.
    pub check_reference_types: bool,
    /// Reject control characters other than tab, CR and LF in string values.
    pub check_control_chars: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            check_reference_types: true,
            check_control_chars: true,
        }
    }
}

impl ModelConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the defaults, overridden by `ATRIUS_MODEL_CHECK_REFERENCE_TYPES`
    /// and `ATRIUS_MODEL_CHECK_CONTROL_CHARS` when they are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(CHECK_REFERENCE_TYPES_ENV) {
            config.check_reference_types = parse_flag(CHECK_REFERENCE_TYPES_ENV, &value)?;
        }
        if let Some(value) = lookup(CHECK_CONTROL_CHARS_ENV) {
            config.check_control_chars = parse_flag(CHECK_CONTROL_CHARS_ENV, &value)?;
        }
        Ok(config)
    }

    /// Snapshot of the installed configuration.
    pub fn current() -> Arc<ModelConfig> {
        CURRENT.read().clone()
    }

    /// Replaces the process-wide configuration, returning the previous one.
    pub fn install(config: ModelConfig) -> Arc<ModelConfig> {
        tracing::debug!(?config, "installing model configuration");
        std::mem::replace(&mut *CURRENT.write(), Arc::new(config))
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ModelConfig::from_json_str(r#"{"checkControlChars": false}"#).unwrap();
        assert!(config.check_reference_types);
        assert!(!config.check_control_chars);
        assert!(ModelConfig::from_json_str("[1]").is_err());
    }

    #[test]
    fn env_flags_parse() {
        let config = ModelConfig::from_lookup(|var| match var {
            CHECK_REFERENCE_TYPES_ENV => Some("0".to_string()),
            _ => None,
        })
        .unwrap();
        assert!(!config.check_reference_types);
        assert!(config.check_control_chars);

        let err = ModelConfig::from_lookup(|_| Some("maybe".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { value, .. } if value == "maybe"));
    }
}
