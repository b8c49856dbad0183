//! Search endpoint construction and pagination link resolution.

use url::Url;

/// Path of the results page on the search origin.
const SEARCH_PATH: &str = "/s";

/// Error type for origin and link parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("link leaves the search origin: {0}")]
    OffOrigin(String),
}

/// Parse the configured search origin.
///
/// Leading/trailing whitespace is ignored; only `http` and `https` are
/// accepted. Path, query and fragment are dropped so later joins always
/// resolve against the site root.
pub fn parse_origin(input: &str) -> Result<Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    parsed.set_path("/");
    parsed.set_query(None);
    parsed.set_fragment(None);

    Ok(parsed)
}

/// Build the first results page URL for `keyword`.
///
/// The keyword is percent-encoded (spaces as `%20`) into the `wd` parameter
/// of `{origin}/s?ie=utf-8&tn=baidu&wd=...`.
pub fn search_url(origin: &Url, keyword: &str) -> Result<Url, UrlError> {
    let mut url = origin.join(SEARCH_PATH).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    url.set_query(Some(&format!("ie=utf-8&tn=baidu&wd={}", urlencoding::encode(keyword))));
    Ok(url)
}

/// Resolve a pagination `href` against the origin.
///
/// The resolved URL must keep the origin's scheme, host and port; absolute
/// and protocol-relative links to any other site are rejected.
pub fn resolve_href(origin: &Url, href: &str) -> Result<Url, UrlError> {
    let href = href.trim();
    if href.is_empty() {
        return Err(UrlError::Empty);
    }

    let resolved = origin.join(href).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    if resolved.origin() != origin.origin() {
        return Err(UrlError::OffOrigin(resolved.to_string()));
    }

    Ok(resolved)
}
