//! HTTP page fetching.
//!
//! ### Request Shape
//! - One `reqwest::Client` per fetcher, built once with a fixed timeout and
//!   the browser-like header set from [`headers`].
//! - `User-Agent` is attached per request according to [`UserAgentPolicy`].
//!
//! ### Failure Classification
//! - Timeouts map to `Error::FetchTimeout`.
//! - Transport failures and non-2xx statuses map to `Error::HttpError`.
//!
//! Both are soft for the pager: they end pagination without reaching the caller.

pub mod headers;
pub mod url;

use async_trait::async_trait;
use reqwest::{Client, header};
use std::time::Instant;

pub use headers::{USER_AGENTS, UserAgentPolicy, default_headers};
pub use self::url::{UrlError, parse_origin, resolve_href, search_url};

use baidusearch_core::Error;

use crate::config::SearchConfig;

/// Source of results page HTML.
///
/// The pager only talks to this trait, so tests can serve canned pages
/// without any network I/O.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its body. `page` is the 1-based page number
    /// within the current search.
    async fn fetch_page(&self, url: &::url::Url, page: usize) -> Result<String, Error>;
}

/// `reqwest`-backed page fetcher.
///
/// Holds no per-search state; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
    user_agent: String,
    user_agents: UserAgentPolicy,
}

impl HttpFetcher {
    /// Create a new fetcher for the already parsed `origin`, which is sent as
    /// the `Referer` on every request.
    pub fn new(origin: &::url::Url, config: &SearchConfig) -> Result<Self, Error> {
        headers::header_value("User-Agent", &config.user_agent)?;

        let http = Client::builder()
            .default_headers(default_headers(origin.as_str(), &config.accept_language)?)
            .timeout(config.timeout)
            .use_rustls_tls()
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::HttpClient(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, user_agent: config.user_agent.clone(), user_agents: config.user_agents.clone() })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &::url::Url, page: usize) -> Result<String, Error> {
        let start = Instant::now();

        let response = self
            .http
            .get(url.as_str())
            .header(header::USER_AGENT, self.user_agents.pick(&self.user_agent, page))
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpError(format!("status {} for {}", status.as_u16(), url)));
        }

        let body = response.text().await.map_err(classify)?;

        tracing::debug!(page, "fetched {} in {}ms ({} bytes)", url, start.elapsed().as_millis(), body.len());

        Ok(body)
    }
}

/// Map a transport error onto the shared error type.
fn classify(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::FetchTimeout(err.to_string())
    } else {
        Error::HttpError(format!("network error: {}", err))
    }
}
