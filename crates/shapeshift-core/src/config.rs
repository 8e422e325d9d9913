//! Engine configuration
//!
//! Settings are loaded from, in increasing precedence:
//! - Default values
//! - A configuration file (YAML or JSON)
//! - Environment variables (`SHAPESHIFT_VERIFY_WRITES`, `SHAPESHIFT_DEEP_BY_DEFAULT`)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const VERIFY_WRITES_ENV: &str = "SHAPESHIFT_VERIFY_WRITES";
pub const DEEP_BY_DEFAULT_ENV: &str = "SHAPESHIFT_DEEP_BY_DEFAULT";

/// Behavior switches of the transformation engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Read every written target property back and fail if it is absent
    pub verify_writes: bool,

    /// Deep flag used by calls that do not pass one explicitly
    pub deep_by_default: bool,
}

impl EngineConfig {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| configuration("invalid JSON configuration", e))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| configuration("invalid YAML configuration", e))
    }

    /// Load configuration from a file, YAML for `.yaml`/`.yml`, JSON otherwise
    ///
    /// An unreadable file is an `Io` error, malformed content a `Configuration` error.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Defaults overridden by the environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override settings present in the environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = var(VERIFY_WRITES_ENV) {
            self.verify_writes = parse_flag(VERIFY_WRITES_ENV, &value)?;
        }
        if let Some(value) = var(DEEP_BY_DEFAULT_ENV) {
            self.deep_by_default = parse_flag(DEEP_BY_DEFAULT_ENV, &value)?;
        }
        Ok(())
    }

    pub fn with_verify_writes(mut self, verify_writes: bool) -> Self {
        self.verify_writes = verify_writes;
        self
    }

    pub fn with_deep_by_default(mut self, deep_by_default: bool) -> Self {
        self.deep_by_default = deep_by_default;
        self
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(Error::Configuration {
            message: format!("{} must be a boolean, got {:?}", name, other),
            source: None,
        }),
    }
}

fn configuration<E>(message: &str, source: E) -> Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    Error::Configuration {
        message: format!("{}: {}", message, source),
        source: Some(source.into()),
    }
}
