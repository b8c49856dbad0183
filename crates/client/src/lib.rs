//! Client code for baidusearch.
//!
//! This crate provides the paginated keyword search, the results page
//! extraction heuristics, and the HTTP fetch layer they run on.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod search;

pub use config::SearchConfig;
pub use extract::{ABSTRACT_MAX_LENGTH, PageExtractor, PageOutcome};
pub use fetch::{HttpFetcher, PageFetcher, USER_AGENTS, UserAgentPolicy};
pub use search::{SearchClient, SearchOptions, SearchResult, search};

pub use baidusearch_core::Error;
