//! Unified error types for baidusearch.
//!
//! Only `InvalidInput` and construction failures ever reach a caller of
//! `search`; fetch and extraction errors are absorbed by the pager.

/// Unified error types for the search client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty keyword).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Invalid URL (origin, endpoint or pagination link).
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP_CLIENT: {0}")]
    HttpClient(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// HTTP error response or transport failure.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// A single result item could not be extracted.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),
}

impl Error {
    /// Whether the pager should absorb this error and stop paginating
    /// instead of returning it to the caller.
    pub fn is_soft(&self) -> bool {
        matches!(self, Error::FetchTimeout(_) | Error::HttpError(_) | Error::ExtractFailed(_))
    }
}
