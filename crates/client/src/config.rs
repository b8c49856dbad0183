//! Search client configuration.

use std::time::Duration;

use baidusearch_core::AppConfig;
use baidusearch_core::config::{DEFAULT_ACCEPT_LANGUAGE, DEFAULT_ORIGIN, DEFAULT_USER_AGENT};

use crate::fetch::UserAgentPolicy;

/// Configuration for a [`SearchClient`](crate::SearchClient).
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search engine origin (default: https://www.baidu.com)
    pub origin: String,

    /// Per-page request timeout (default: 30s)
    pub timeout: Duration,

    /// Pinned user agent (default: desktop Chrome)
    pub user_agent: String,

    /// User agent selection per page (default: pinned)
    pub user_agents: UserAgentPolicy,

    /// Accept-Language header (default: "zh-CN,zh;q=0.9")
    pub accept_language: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            user_agents: UserAgentPolicy::Pinned,
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

impl From<&AppConfig> for SearchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            origin: config.origin.clone(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            user_agents: if config.rotate_user_agents { UserAgentPolicy::Rotate } else { UserAgentPolicy::Pinned },
            accept_language: config.accept_language.clone(),
        }
    }
}
