//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (BAIDUSEARCH_*)
//! 2. TOML config file (if BAIDUSEARCH_CONFIG_FILE set)
//! 3. Built-in defaults
//!
//! The search client never calls [`AppConfig::load`] itself; front ends load
//! it and hand the values to the client.

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Origin every search and pagination request is resolved against.
pub const DEFAULT_ORIGIN: &str = "https://www.baidu.com";

/// Browser user agent pinned into the default header set.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/68.0.3440.106 Safari/537.36";

/// Default `Accept-Language` header.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "zh-CN,zh;q=0.9";

/// Default number of results requested per search.
pub const DEFAULT_NUM_RESULTS: usize = 10;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BAIDUSEARCH_*)
/// 2. TOML config file (if BAIDUSEARCH_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Search engine origin.
    ///
    /// Set via BAIDUSEARCH_ORIGIN environment variable.
    #[serde(default = "default_origin")]
    pub origin: String,

    /// Per-page HTTP timeout in milliseconds.
    ///
    /// Set via BAIDUSEARCH_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent header sent with every page request.
    ///
    /// Set via BAIDUSEARCH_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Rotate through the built-in browser user agent pool, one per page.
    ///
    /// Set via BAIDUSEARCH_ROTATE_USER_AGENTS environment variable.
    #[serde(default)]
    pub rotate_user_agents: bool,

    /// Accept-Language header.
    ///
    /// Set via BAIDUSEARCH_ACCEPT_LANGUAGE environment variable.
    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Default number of results when the caller does not ask for a count.
    ///
    /// Set via BAIDUSEARCH_NUM_RESULTS environment variable.
    #[serde(default = "default_num_results")]
    pub num_results: usize,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.into()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.into()
}

fn default_accept_language() -> String {
    DEFAULT_ACCEPT_LANGUAGE.into()
}

fn default_num_results() -> usize {
    DEFAULT_NUM_RESULTS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            rotate_user_agents: false,
            accept_language: default_accept_language(),
            num_results: default_num_results(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `BAIDUSEARCH_`
    /// 2. TOML file from `BAIDUSEARCH_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("BAIDUSEARCH_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("BAIDUSEARCH_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
