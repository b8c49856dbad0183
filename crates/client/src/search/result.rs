//! Search result and option types.

use baidusearch_core::config::DEFAULT_NUM_RESULTS;
use serde::{Deserialize, Serialize};

/// One organic search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title, never empty.
    pub title: String,
    /// Summary text, at most 300 characters.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Link target as found in the markup; may be relative or empty.
    pub url: String,
    /// 1-based position across the whole search.
    pub rank: usize,
}

/// Per-call search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Number of results wanted (default 10). Fewer may come back.
    pub num_results: usize,
    /// Promote progress and diagnostic traces to `info`/`warn`.
    pub debug: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { num_results: DEFAULT_NUM_RESULTS, debug: false }
    }
}

impl SearchOptions {
    /// Options asking for `num_results` results.
    pub fn with_num_results(num_results: usize) -> Self {
        Self { num_results, ..Default::default() }
    }

    /// Enable or disable diagnostics.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
