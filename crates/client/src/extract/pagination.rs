//! Next-page link discovery.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::fetch::{UrlError, resolve_href};

static NAV_ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.n").expect("invalid selector"));

/// Label of the backward navigation link.
const PREVIOUS_PAGE_LABEL: &str = "上一页";

/// Find the forward pagination link and resolve it against `origin`.
///
/// Only the last `a.n` anchor is considered. On the final page that anchor
/// is the backward link, which means there is no next page. Links pointing
/// at another origin are dropped.
pub fn next_page_url(document: &Html, origin: &Url) -> Option<Url> {
    let last = document.select(&NAV_ANCHOR).last()?;

    if last.text().collect::<String>().contains(PREVIOUS_PAGE_LABEL) {
        return None;
    }

    let href = last.value().attr("href")?;
    match resolve_href(origin, href) {
        Ok(url) => Some(url),
        Err(e @ UrlError::OffOrigin(_)) => {
            tracing::warn!("refusing pagination link {:?}: {}", href, e);
            None
        }
        Err(e) => {
            tracing::debug!("ignoring pagination link {:?}: {}", href, e);
            None
        }
    }
}
