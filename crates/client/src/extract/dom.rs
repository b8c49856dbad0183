//! Minimal DOM capabilities used by the result strategies.
//!
//! Strategies never touch `scraper` directly; they only need to check a
//! class, read text and attributes, and look up descendants matching one of
//! a handful of fixed queries.

use std::sync::LazyLock;

use scraper::{ElementRef, Node, Selector};

static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3").expect("invalid selector"));
static HEADING_ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h3 a").expect("invalid selector"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("invalid selector"));
static ABSTRACT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.c-abstract").expect("invalid selector"));
static DIV: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div").expect("invalid selector"));

/// Descendant lookups the strategies rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    /// Result heading (`h3`).
    Heading,
    /// Anchor inside any result heading (`h3 a`).
    HeadingAnchor,
    /// Any anchor (`a`).
    Anchor,
    /// Summary block (`div.c-abstract`).
    Abstract,
    /// Any `div`.
    Div,
}

impl Query {
    fn selector(self) -> &'static Selector {
        match self {
            Query::Heading => &*HEADING,
            Query::HeadingAnchor => &*HEADING_ANCHOR,
            Query::Anchor => &*ANCHOR,
            Query::Abstract => &*ABSTRACT,
            Query::Div => &*DIV,
        }
    }
}

/// A result item node.
pub trait ResultNode: Sized {
    /// Whether the class list contains `class`.
    fn has_class(&self, class: &str) -> bool;

    /// Attribute value, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated descendant text, trimmed.
    fn text(&self) -> String;

    /// Text of the first child node (element or text), or `None` when the
    /// node has no children.
    fn first_child_text(&self) -> Option<String>;

    /// First descendant (never the node itself) matching `query`.
    fn find(&self, query: Query) -> Option<Self>;

    /// Text of every descendant matching `query`, joined in document order
    /// and trimmed. `None` when nothing matches.
    fn find_all_text(&self, query: Query) -> Option<String>;
}

impl ResultNode for ElementRef<'_> {
    fn has_class(&self, class: &str) -> bool {
        self.value().classes().any(|c| c == class)
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect::<String>().trim().to_string()
    }

    fn first_child_text(&self) -> Option<String> {
        let child = self.first_child()?;
        let text = match child.value() {
            Node::Text(text) => String::from(&**text),
            Node::Element(_) => ElementRef::wrap(child).map(|el| ElementRef::text(&el).collect()).unwrap_or_default(),
            _ => String::new(),
        };
        Some(text)
    }

    fn find(&self, query: Query) -> Option<Self> {
        let own_id = self.id();
        self.select(query.selector()).find(|el| el.id() != own_id)
    }

    fn find_all_text(&self, query: Query) -> Option<String> {
        let own_id = self.id();
        let mut matches = self.select(query.selector()).filter(|el| el.id() != own_id).peekable();
        matches.peek()?;
        Some(matches.flat_map(|el| ElementRef::text(&el)).collect::<String>().trim().to_string())
    }
}
