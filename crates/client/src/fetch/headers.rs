//! Browser-like request headers.
//!
//! Every page request carries the same fixed header set so the results page
//! is served as it would be to a desktop browser. The user agent is either
//! pinned or picked from [`USER_AGENTS`] by page number.

use baidusearch_core::Error;
use baidusearch_core::config::DEFAULT_USER_AGENT;
use reqwest::header::{self, HeaderMap, HeaderValue};

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8";
const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const ACCEPT_ENCODING: &str = "gzip, deflate";

/// Browser user agents available for rotation. The first entry is the pinned default.
pub const USER_AGENTS: [&str; 10] = [
    DEFAULT_USER_AGENT,
    "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Ubuntu Chromium/49.0.2623.108 Chrome/49.0.2623.108 Safari/537.36",
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; pt-BR) AppleWebKit/533.3 (KHTML, like Gecko) QtWeb Internet Browser/3.7 http://www.QtWeb.net",
    "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36",
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US) AppleWebKit/532.2 (KHTML, like Gecko) ChromePlus/4.0.222.3 Chrome/4.0.222.3 Safari/532.2",
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.8.1.4pre) Gecko/20070404 K-Ninja/2.1.3",
    "Mozilla/5.0 (Future Star Technologies Corp.; Star-Blade OS; x86_64; U; en-US) iNet Browser 4.7",
    "Mozilla/5.0 (Windows; U; Windows NT 6.1; rv:2.2) Gecko/20110201",
    "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-US; rv:1.8.1.13) Gecko/20080414 Firefox/2.0.0.13 Pogo/2.0.0.13.6866",
];

/// How the `User-Agent` header is chosen for each page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UserAgentPolicy {
    /// Send the same user agent on every request.
    #[default]
    Pinned,
    /// Walk [`USER_AGENTS`] by page number (page 1 gets the first entry).
    Rotate,
}

impl UserAgentPolicy {
    /// User agent for the 1-based `page`.
    ///
    /// Depends only on its inputs, so concurrent searches never share a cursor.
    pub fn pick<'a>(&self, pinned: &'a str, page: usize) -> &'a str {
        match self {
            UserAgentPolicy::Pinned => pinned,
            UserAgentPolicy::Rotate => USER_AGENTS[page.saturating_sub(1) % USER_AGENTS.len()],
        }
    }
}

/// Build the fixed header set shared by every request, minus `User-Agent`.
pub fn default_headers(referer: &str, accept_language: &str) -> Result<HeaderMap, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static(ACCEPT_ENCODING));
    headers.insert(header::REFERER, header_value("Referer", referer)?);
    headers.insert(header::ACCEPT_LANGUAGE, header_value("Accept-Language", accept_language)?);
    Ok(headers)
}

pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|e| Error::HttpClient(format!("invalid {name} header: {e}")))
}
