//! Paginated keyword search.
//!
//! The pager requests results pages one after another, hands each page to
//! the [`PageExtractor`] with the running rank counter, and stops when enough
//! results are collected or the page has no forward link. A page that fails
//! softly (see [`Error::is_soft`]) ends the search early; whatever was
//! collected so far is returned.

pub mod result;

pub use result::{SearchOptions, SearchResult};

use baidusearch_core::Error;
use url::Url;

use crate::config::SearchConfig;
use crate::extract::{PageExtractor, PageOutcome};
use crate::fetch::{HttpFetcher, PageFetcher, parse_origin, search_url};

/// Keyword search client.
///
/// Holds no per-search state, so one client can serve concurrent searches.
#[derive(Debug, Clone)]
pub struct SearchClient<F = HttpFetcher> {
    fetcher: F,
    extractor: PageExtractor,
    origin: Url,
}

impl SearchClient<HttpFetcher> {
    /// Create a client that fetches pages over HTTP.
    pub fn new(config: &SearchConfig) -> Result<Self, Error> {
        let origin = parse_origin(&config.origin).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        let fetcher = HttpFetcher::new(&origin, config)?;
        Ok(Self::with_fetcher(origin, fetcher))
    }
}

impl<F: PageFetcher> SearchClient<F> {
    /// Create a client around any page source.
    pub fn with_fetcher(origin: Url, fetcher: F) -> Self {
        Self { fetcher, extractor: PageExtractor::new(origin.clone()), origin }
    }

    /// Get reference to the page fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Search for `keyword`, following pagination until `options.num_results`
    /// results are collected or the last page is reached.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an empty keyword, before any request
    /// is made. Soft page failures never surface here; any other error from
    /// the fetcher aborts the search.
    pub async fn search(&self, keyword: &str, options: &SearchOptions) -> Result<Vec<SearchResult>, Error> {
        if keyword.trim().is_empty() {
            return Err(Error::InvalidInput("keyword is required".into()));
        }

        let mut results: Vec<SearchResult> = Vec::new();
        let mut rank = 0;
        let mut page = 1;
        let mut next_url = Some(search_url(&self.origin, keyword).map_err(|e| Error::InvalidUrl(e.to_string()))?);

        while results.len() < options.num_results {
            let Some(url) = next_url.take() else { break };

            let outcome = match self.fetcher.fetch_page(&url, page).await {
                Ok(html) => self.extractor.parse(&html, rank, options.debug),
                Err(e) if e.is_soft() => {
                    if options.debug {
                        tracing::warn!(page, "failed to fetch {}: {}", url, e);
                    } else {
                        tracing::trace!(page, "failed to fetch {}: {}", url, e);
                    }
                    PageOutcome::default()
                }
                Err(e) => return Err(e),
            };

            rank += outcome.records.len();

            if options.debug && !outcome.records.is_empty() {
                tracing::info!(
                    page,
                    results = outcome.records.len(),
                    "searching [{}], finished parsing page {}",
                    keyword,
                    page
                );
                for record in &outcome.records {
                    if let Ok(json) = serde_json::to_string(record) {
                        tracing::info!("{}", json);
                    }
                }
            }

            results.extend(outcome.records);

            match outcome.next_url {
                Some(next) => {
                    next_url = Some(next);
                    page += 1;
                }
                None => {
                    if options.debug {
                        tracing::info!(page, "already searched the last page");
                    }
                    break;
                }
            }
        }

        if options.debug {
            tracing::info!(total = results.len(), "search [{}] finished", keyword);
        }

        results.truncate(options.num_results);
        Ok(results)
    }
}

/// Search with a default client.
///
/// Builds a [`SearchClient`] from [`SearchConfig::default`] for this call.
pub async fn search(keyword: &str, options: SearchOptions) -> Result<Vec<SearchResult>, Error> {
    if keyword.trim().is_empty() {
        return Err(Error::InvalidInput("keyword is required".into()));
    }
    SearchClient::new(&SearchConfig::default())?.search(keyword, &options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves canned pages by URL and records every request.
    #[derive(Debug, Default)]
    struct FakeFetcher {
        pages: HashMap<String, String>,
        requests: Mutex<Vec<(String, usize)>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, html: String) -> Self {
            self.pages.insert(url.to_string(), html);
            self
        }

        fn requests(&self) -> Vec<(String, usize)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch_page(&self, url: &Url, page: usize) -> Result<String, Error> {
            self.requests.lock().unwrap().push((url.to_string(), page));
            self.pages
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| Error::HttpError(format!("status 404 for {}", url)))
        }
    }

    const FIRST_PAGE: &str = "https://www.baidu.com/s?ie=utf-8&tn=baidu&wd=rust";
    const SECOND_PAGE: &str = "https://www.baidu.com/s?wd=rust&pn=10";

    /// A results page with `count` items titled `Result {n}` starting at `first`.
    fn results_page(first: usize, count: usize, next: Option<&str>) -> String {
        let items: String = (first..first + count)
            .map(|n| {
                format!(
                    r#"<div class="result c-container" id="{n}">
                        <h3 class="t"><a href="https://www.baidu.com/link?url={n}">Result {n}</a></h3>
                        <div class="c-abstract">Abstract for result {n}</div>
                    </div>"#
                )
            })
            .collect();

        let nav = match next {
            Some(href) => format!(r#"<a class="n" href="/s?wd=rust&amp;pn=0">&lt; 上一页</a><a class="n" href="{href}">下一页 &gt;</a>"#),
            None => r#"<a class="n" href="/s?wd=rust&amp;pn=0">&lt; 上一页</a>"#.to_string(),
        };

        format!(
            r#"<html><body>
                <div id="content_left">{items}</div>
                <div id="page">{nav}</div>
            </body></html>"#
        )
    }

    fn client(fetcher: FakeFetcher) -> SearchClient<FakeFetcher> {
        SearchClient::with_fetcher(Url::parse("https://www.baidu.com").unwrap(), fetcher)
    }

    fn two_pages() -> FakeFetcher {
        FakeFetcher::default()
            .with_page(FIRST_PAGE, results_page(1, 10, Some("/s?wd=rust&amp;pn=10")))
            .with_page(SECOND_PAGE, results_page(11, 5, None))
    }

    #[tokio::test]
    async fn test_empty_keyword_makes_no_requests() {
        let client = client(two_pages());

        let result = client.search("", &SearchOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        let result = client.search("   ", &SearchOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidInput(_))));

        assert!(client.fetcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_two_pages_combined() {
        let client = client(two_pages());

        let results = client.search("rust", &SearchOptions::with_num_results(12)).await.unwrap();

        assert_eq!(results.len(), 12);
        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=12).collect::<Vec<_>>());
        assert_eq!(results[9].title, "Result 10");
        assert_eq!(results[10].title, "Result 11");
        assert_eq!(results[11].abstract_text, "Abstract for result 12");

        let requests = client.fetcher().requests();
        assert_eq!(requests, vec![(FIRST_PAGE.to_string(), 1), (SECOND_PAGE.to_string(), 2)]);
    }

    #[tokio::test]
    async fn test_quota_met_on_first_page() {
        let client = client(two_pages());

        let results = client.search("rust", &SearchOptions::with_num_results(4)).await.unwrap();

        assert_eq!(results.len(), 4);
        assert_eq!(results.last().unwrap().rank, 4);
        assert_eq!(client.fetcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_exhausted_before_quota() {
        let client = client(two_pages());

        let results = client.search("rust", &SearchOptions::with_num_results(50).debug(true)).await.unwrap();

        assert_eq!(results.len(), 15);
        assert_eq!(results.last().unwrap().rank, 15);
        assert_eq!(client.fetcher().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_results_requested() {
        let client = client(two_pages());

        let results = client.search("rust", &SearchOptions::with_num_results(0)).await.unwrap();

        assert!(results.is_empty());
        assert!(client.fetcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_failed_page_keeps_earlier_results() {
        let fetcher =
            FakeFetcher::default().with_page(FIRST_PAGE, results_page(1, 10, Some("/s?wd=rust&amp;pn=10")));
        let client = client(fetcher);

        let results = client.search("rust", &SearchOptions::with_num_results(30)).await.unwrap();

        assert_eq!(results.len(), 10);
        assert_eq!(client.fetcher().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_first_page_is_not_an_error() {
        let client = client(FakeFetcher::default());

        let results = client.search("rust", &SearchOptions::default().debug(true)).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(client.fetcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_blocked_page_without_container_stops() {
        let fetcher = FakeFetcher::default()
            .with_page(FIRST_PAGE, "<html><body>百度安全验证</body></html>".to_string());
        let client = client(fetcher);

        let results = client.search("rust", &SearchOptions::default()).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(client.fetcher().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_ranks_contiguous_with_skipped_items() {
        let page_one = results_page(1, 3, Some("/s?wd=rust&amp;pn=10")).replace(
            r#"<div id="content_left">"#,
            r#"<div id="content_left"><div class="c-container" tpl="broken"></div>"#,
        );
        let fetcher = FakeFetcher::default()
            .with_page(FIRST_PAGE, page_one)
            .with_page(SECOND_PAGE, results_page(4, 3, None));
        let client = client(fetcher);

        let results = client.search("rust", &SearchOptions::default()).await.unwrap();

        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
        assert!(results.iter().all(|r| !r.title.is_empty()));
    }

    /// Fails every request with a non-recoverable error.
    struct MisconfiguredFetcher;

    #[async_trait]
    impl PageFetcher for MisconfiguredFetcher {
        async fn fetch_page(&self, _url: &Url, _page: usize) -> Result<String, Error> {
            Err(Error::HttpClient("connector unavailable".into()))
        }
    }

    #[tokio::test]
    async fn test_hard_fetch_error_is_returned() {
        let client = SearchClient::with_fetcher(Url::parse("https://www.baidu.com").unwrap(), MisconfiguredFetcher);

        let result = client.search("rust", &SearchOptions::default()).await;
        assert!(matches!(result, Err(Error::HttpClient(msg)) if msg == "connector unavailable"));
    }

    #[test]
    fn test_new_rejects_invalid_origin() {
        let config = SearchConfig { origin: "not a url".into(), ..Default::default() };
        assert!(matches!(SearchClient::new(&config), Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_free_function_rejects_empty_keyword() {
        let result = search("", SearchOptions::default()).await;
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg == "keyword is required"));
    }
}
