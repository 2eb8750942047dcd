// SPDX-License-Identifier: GPL-3.0-only

//! Connection settings
//!
//! Settings come from a TOML document (or are built in code), then
//! `LSM_URI`, `LSM_PASSWORD` and `LSM_TIMEOUT_MS` override whatever the
//! document said.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::protocol::{ErrorNumber, LsmError};

pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;

pub const ENV_URI: &str = "LSM_URI";
pub const ENV_PASSWORD: &str = "LSM_PASSWORD";
pub const ENV_TIMEOUT_MS: &str = "LSM_TIMEOUT_MS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse connection settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("LSM_TIMEOUT_MS is not a number: {0}")]
    Timeout(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectConfig {
    /// Plugin URI; the scheme names the plugin, e.g. `sim://`
    pub uri: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Handed to the plugin at connect time
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u32,
}

fn default_timeout_ms() -> u32 {
    DEFAULT_TIMEOUT_MS
}

impl ConnectConfig {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            password: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Apply `LSM_*` overrides from the process environment
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply `LSM_*` overrides from `lookup`
    pub fn with_overrides_from(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(uri) = lookup(ENV_URI) {
            self.uri = uri;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        if let Some(timeout) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = timeout
                .trim()
                .parse()
                .map_err(|_| ConfigError::Timeout(timeout.clone()))?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), LsmError> {
        if self.uri.is_empty() {
            return Err(LsmError::invalid_argument("uri must not be empty"));
        }
        if self.timeout_ms == 0 {
            return Err(LsmError::invalid_argument("timeout must be non-zero"));
        }
        self.plugin_name().map(|_| ())
    }

    /// Plugin name, taken from the URI scheme
    pub fn plugin_name(&self) -> Result<String, LsmError> {
        let url = Url::parse(&self.uri).map_err(|e| {
            LsmError::new(ErrorNumber::InvalidUri, format!("invalid uri '{}'", self.uri))
                .with_exception(e.to_string())
        })?;
        Ok(url.scheme().to_string())
    }
}
