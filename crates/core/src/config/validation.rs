//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;
use url::Url;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `origin` is not an absolute http(s) URL with a host
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` or `accept_language` is empty
    /// - `num_results` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        let origin = Url::parse(&self.origin)
            .map_err(|e| ConfigError::Invalid { field: "origin".into(), reason: e.to_string() })?;
        if !matches!(origin.scheme(), "http" | "https") || origin.host_str().is_none() {
            return Err(ConfigError::Invalid { field: "origin".into(), reason: "must be an http(s) URL".into() });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.accept_language.is_empty() {
            return Err(ConfigError::Invalid { field: "accept_language".into(), reason: "must not be empty".into() });
        }

        if self.num_results == 0 {
            return Err(ConfigError::Invalid { field: "num_results".into(), reason: "must be greater than 0".into() });
        }

        if self.rotate_user_agents && self.user_agent != super::DEFAULT_USER_AGENT {
            tracing::warn!(
                user_agent = %self.user_agent,
                "custom user_agent is ignored while rotate_user_agents is enabled"
            );
        }

        Ok(())
    }
}
