//! Client configuration.
//!
//! Defaults point at the public service; `SHAPESHIFT_BASE_URL` and
//! `SHAPESHIFT_TIMEOUT_SECS` override them.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ApiResult;
use crate::transport::DEFAULT_TIMEOUT;

pub const DEFAULT_BASE_URL: &str = "https://shapeshift.io/";
pub const ENV_PREFIX: &str = "SHAPESHIFT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load from `SHAPESHIFT_*` environment variables layered over defaults.
    pub fn from_env() -> ApiResult<Self> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    pub fn load(environment: config::Environment) -> ApiResult<Self> {
        let settings = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_secs", DEFAULT_TIMEOUT.as_secs())?
            .add_source(environment.try_parsing(true))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
