//! Result item strategies.
//!
//! The results page mixes several item templates that put the title and
//! summary in different places. Each candidate is classified once by its
//! class list and then handed to a single pure extraction function.

use baidusearch_core::Error;

use super::dom::{Query, ResultNode};

/// Class marking an `#content_left` child as a result item.
pub const CONTAINER_CLASS: &str = "c-container";

/// Fields pulled from one item, before trimming and truncation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub url: String,
    pub abstract_text: String,
}

/// Why a candidate produced no record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    /// The item has no child nodes to take a title from.
    #[error("item has no content")]
    NoContent,

    /// The resolved title is empty after trimming.
    #[error("item has an empty title")]
    EmptyTitle,
}

impl From<ItemError> for Error {
    fn from(err: ItemError) -> Self {
        Error::ExtractFailed(err.to_string())
    }
}

/// Extraction procedure for one item template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Items tagged `xpath-log`.
    XpathLog,
    /// Items tagged `result`.
    Result,
    /// Everything else, typically `tpl`-attribute items.
    Template,
}

impl Strategy {
    /// Pick the strategy for a candidate. `xpath-log` wins over `result`.
    pub fn classify<N: ResultNode>(node: &N) -> Self {
        if node.has_class("xpath-log") {
            Strategy::XpathLog
        } else if node.has_class("result") {
            Strategy::Result
        } else {
            Strategy::Template
        }
    }

    /// Run this strategy against `node`.
    pub fn extract<N: ResultNode>(self, node: &N) -> Result<RawItem, ItemError> {
        match self {
            Strategy::XpathLog => Ok(xpath_log(node)),
            Strategy::Result => Ok(result(node)),
            Strategy::Template => template(node),
        }
    }
}

fn xpath_log<N: ResultNode>(node: &N) -> RawItem {
    let (title, url) = match node.find_all_text(Query::Heading) {
        Some(title) => (title, heading_link(node)),
        None => (first_line(node), first_link(node)),
    };

    RawItem { title, url, abstract_text: abstract_or(node, || trailing_lines(node)) }
}

fn result<N: ResultNode>(node: &N) -> RawItem {
    let (title, url) = match node.find_all_text(Query::Heading) {
        Some(title) => (title, heading_link(node)),
        None => (first_line(node), first_link(node)),
    };

    RawItem { title, url, abstract_text: abstract_or(node, || trailing_lines(node)) }
}

fn template<N: ResultNode>(node: &N) -> Result<RawItem, ItemError> {
    let (title, url) = match node.find_all_text(Query::Heading) {
        Some(title) => (title, heading_link(node)),
        None => (node.first_child_text().ok_or(ItemError::NoContent)?, first_link(node)),
    };

    Ok(RawItem { title, url, abstract_text: abstract_or(node, || node.text()) })
}

/// First anchor inside any of the item's headings.
fn heading_link<N: ResultNode>(node: &N) -> String {
    node.find(Query::HeadingAnchor).map(|a| href(&a)).unwrap_or_default()
}

fn first_link<N: ResultNode>(node: &N) -> String {
    node.find(Query::Anchor).map(|a| href(&a)).unwrap_or_default()
}

fn href<N: ResultNode>(anchor: &N) -> String {
    anchor.attr("href").map(str::trim).unwrap_or_default().to_string()
}

/// Every `div.c-abstract`, else the first nested `div`, else `fallback`.
fn abstract_or<N: ResultNode, F: FnOnce() -> String>(node: &N, fallback: F) -> String {
    if let Some(text) = node.find_all_text(Query::Abstract) {
        return text;
    }
    match node.find(Query::Div) {
        Some(div) => div.text(),
        None => fallback(),
    }
}

fn first_line<N: ResultNode>(node: &N) -> String {
    node.text().split('\n').next().unwrap_or_default().to_string()
}

fn trailing_lines<N: ResultNode>(node: &N) -> String {
    node.text().split('\n').skip(1).collect::<Vec<_>>().join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{ElementRef, Html, Selector};

    fn run(html: &str) -> (Strategy, Result<RawItem, ItemError>) {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse("div.c-container").unwrap();
        let item: ElementRef<'_> = document.select(&selector).next().unwrap();
        let strategy = Strategy::classify(&item);
        (strategy, strategy.extract(&item))
    }

    #[test]
    fn test_classify_order() {
        let (strategy, _) = run(r#"<div class="c-container xpath-log result"><h3>t</h3></div>"#);
        assert_eq!(strategy, Strategy::XpathLog);

        let (strategy, _) = run(r#"<div class="result c-container"><h3>t</h3></div>"#);
        assert_eq!(strategy, Strategy::Result);

        let (strategy, _) = run(r#"<div class="c-container" tpl="news"><h3>t</h3></div>"#);
        assert_eq!(strategy, Strategy::Template);
    }

    #[test]
    fn test_xpath_log_with_heading() {
        let (_, item) = run(
            r#"<div class="c-container xpath-log">
                <h3><a href=" https://www.baidu.com/link?url=abc ">Rust Language</a></h3>
                <div>first div</div>
                <div class="c-abstract">A language empowering everyone.</div>
            </div>"#,
        );
        let item = item.unwrap();
        assert_eq!(item.title, "Rust Language");
        assert_eq!(item.url, "https://www.baidu.com/link?url=abc");
        assert_eq!(item.abstract_text, "A language empowering everyone.");
    }

    #[test]
    fn test_xpath_log_without_heading_uses_lines() {
        let (_, item) = run("<div class=\"c-container xpath-log\">Title line\nsecond line\nthird line</div>");
        let item = item.unwrap();
        assert_eq!(item.title, "Title line");
        assert_eq!(item.url, "");
        assert_eq!(item.abstract_text, "second line\nthird line");
    }

    #[test]
    fn test_xpath_log_without_heading_takes_first_anchor() {
        let (_, item) = run(r#"<div class="c-container xpath-log"><a href="/first">One</a><a href="/second">Two</a></div>"#);
        let item = item.unwrap();
        assert_eq!(item.title, "OneTwo");
        assert_eq!(item.url, "/first");
    }

    #[test]
    fn test_result_falls_back_to_first_div() {
        let (_, item) = run(
            r#"<div class="result c-container">
                <h3><a href="/r">Result title</a></h3>
                <div><span>Summary from the first div</span></div>
            </div>"#,
        );
        let item = item.unwrap();
        assert_eq!(item.title, "Result title");
        assert_eq!(item.url, "/r");
        assert_eq!(item.abstract_text, "Summary from the first div");
    }

    #[test]
    fn test_result_heading_without_anchor() {
        let (_, item) = run(r#"<div class="result c-container"><h3>Plain heading</h3></div>"#);
        let item = item.unwrap();
        assert_eq!(item.title, "Plain heading");
        assert_eq!(item.url, "");
        assert_eq!(item.abstract_text, "");
    }

    #[test]
    fn test_template_first_child_title() {
        let (_, item) = run(
            r#"<div class="c-container" tpl="sp_realtime"><span>Realtime card</span><a href="/rt">more</a></div>"#,
        );
        let item = item.unwrap();
        assert_eq!(item.title, "Realtime card");
        assert_eq!(item.url, "/rt");
        assert_eq!(item.abstract_text, "Realtime cardmore");
    }

    #[test]
    fn test_template_empty_item() {
        let (strategy, item) = run(r#"<div class="c-container" tpl="empty"></div>"#);
        assert_eq!(strategy, Strategy::Template);
        assert_eq!(item, Err(ItemError::NoContent));
    }

    #[test]
    fn test_split_heading_is_joined() {
        let (_, item) = run(r#"<div class="result c-container"><h3>Part one</h3><h3><a href="/x">Part two</a></h3></div>"#);
        let item = item.unwrap();
        assert_eq!(item.title, "Part onePart two");
        assert_eq!(item.url, "/x");
    }

    #[test]
    fn test_every_abstract_block_is_joined() {
        let (_, item) = run(
            r#"<div class="c-container xpath-log">
                <h3><a href="/a">Title</a></h3>
                <div class="c-abstract">First half, </div>
                <div class="c-abstract">second half.</div>
            </div>"#,
        );
        assert_eq!(item.unwrap().abstract_text, "First half, second half.");
    }

    #[test]
    fn test_template_heading_link_skips_loose_anchor() {
        let (_, item) = run(
            r#"<div class="c-container" tpl="www_normal"><a href="/logo">logo</a><h3>Heading</h3><h3><a href="/real">more</a></h3></div>"#,
        );
        let item = item.unwrap();
        assert_eq!(item.title, "Headingmore");
        assert_eq!(item.url, "/real");
    }

    #[test]
    fn test_item_error_is_soft_extract_failure() {
        let err = Error::from(ItemError::EmptyTitle);
        assert!(matches!(err, Error::ExtractFailed(ref msg) if msg == "item has an empty title"));
        assert!(err.is_soft());
    }
}
