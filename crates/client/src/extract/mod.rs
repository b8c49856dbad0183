//! Results page extraction.
//!
//! ### Candidates
//! - Direct children of `#content_left` whose class list contains `c-container`.
//! - Every other child is skipped without comment.
//!
//! ### Strategies
//! - Each candidate is classified into one [`Strategy`] and extracted by a
//!   pure function over the [`ResultNode`] capabilities.
//!
//! ### Post-processing
//! - Title, abstract and link are trimmed; an empty title drops the item.
//! - Abstracts are cut to [`ABSTRACT_MAX_LENGTH`] UTF-16 code units, never
//!   splitting a character.
//! - Accepted items are ranked from the caller's running counter, so ranks stay
//!   contiguous across pages.
//!
//! Extraction never fails: a missing container gives an empty page with no
//! next link, and a bad item is skipped on its own.

pub mod dom;
pub mod pagination;
pub mod strategy;

pub use dom::{Query, ResultNode};
pub use pagination::next_page_url;
pub use strategy::{CONTAINER_CLASS, ItemError, RawItem, Strategy};

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use baidusearch_core::Error;
use url::Url;

use crate::search::SearchResult;

/// Maximum abstract length, in UTF-16 code units.
pub const ABSTRACT_MAX_LENGTH: usize = 300;

static CONTAINER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#content_left").expect("invalid selector"));

/// Records found on one results page plus the link to the next one.
#[derive(Debug, Clone, Default)]
pub struct PageOutcome {
    /// Accepted records, ranked in page order.
    pub records: Vec<SearchResult>,
    /// Absolute URL of the next page, if any.
    pub next_url: Option<Url>,
}

/// Turns results page HTML into ranked records.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    origin: Url,
}

impl PageExtractor {
    /// Create an extractor resolving pagination links against `origin`.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse one results page.
    ///
    /// The first accepted record gets rank `rank_start + 1`. With `debug` set,
    /// skipped items are logged at `warn` instead of `trace`.
    pub fn parse(&self, html: &str, rank_start: usize, debug: bool) -> PageOutcome {
        let document = Html::parse_document(html);

        let Some(container) = document.select(&CONTAINER).next() else {
            if debug {
                tracing::warn!("results container #content_left not found");
            } else {
                tracing::trace!("results container #content_left not found");
            }
            return PageOutcome::default();
        };

        let mut rank = rank_start;
        let mut records = Vec::new();

        for (index, candidate) in container.children().filter_map(ElementRef::wrap).enumerate() {
            if !candidate.has_class(CONTAINER_CLASS) {
                continue;
            }

            let strategy = Strategy::classify(&candidate);
            match strategy.extract(&candidate).and_then(finish) {
                Ok(item) => {
                    rank += 1;
                    records.push(SearchResult {
                        title: item.title,
                        abstract_text: item.abstract_text,
                        url: item.url,
                        rank,
                    });
                }
                Err(e) => {
                    let err = Error::from(e);
                    if debug {
                        tracing::warn!(index, ?strategy, "skipping result item: {}", err);
                    } else {
                        tracing::trace!(index, ?strategy, "skipping result item: {}", err);
                    }
                }
            }
        }

        let next_url = next_page_url(&document, &self.origin);

        PageOutcome { records, next_url }
    }
}

/// Trim, reject untitled items and cap the abstract.
fn finish(raw: RawItem) -> Result<RawItem, ItemError> {
    let title = raw.title.trim();
    if title.is_empty() {
        return Err(ItemError::EmptyTitle);
    }

    let abstract_text = truncate_utf16(raw.abstract_text.trim(), ABSTRACT_MAX_LENGTH);

    Ok(RawItem { title: title.to_string(), url: raw.url.trim().to_string(), abstract_text: abstract_text.to_string() })
}

/// Longest prefix of `text` that fits in `max` UTF-16 code units.
fn truncate_utf16(text: &str, max: usize) -> &str {
    let mut units = 0;
    for (index, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max {
            return &text[..index];
        }
    }
    text
}
