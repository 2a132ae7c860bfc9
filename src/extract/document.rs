// src/extract/document.rs
// =============================================================================
// The parsed page the extractor reads from.
//
// A ParsedDocument pairs the html5ever tree built by `scraper` with the URL the
// page was actually fetched from (after redirects). The extractor only ever
// reads it: it asks for all nodes of a tag, checks what kind of node each one
// is, and looks up attribute values.
// =============================================================================

use scraper::node::Element;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

/// A parsed HTML page plus its origin URL.
pub struct ParsedDocument {
    html: Html,
    origin: Url,
}

impl ParsedDocument {
    /// Parses raw markup. Never fails: broken HTML is recovered by html5ever.
    pub fn parse(markup: &str, origin: Url) -> Self {
        Self {
            html: Html::parse_document(markup),
            origin,
        }
    }

    /// The URL relative references are resolved against.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Returns every element matching `tag`, in document order.
    ///
    /// A tag name that isn't a valid selector simply matches nothing.
    pub fn query(&self, tag: &str) -> Vec<ElementRef<'_>> {
        let selector = match Selector::parse(tag) {
            Ok(selector) => selector,
            Err(e) => {
                debug!(tag, error = %e, "unusable tag query");
                return Vec::new();
            }
        };

        self.html.select(&selector).collect()
    }
}

impl std::fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDocument")
            .field("origin", &self.origin.as_str())
            .finish_non_exhaustive()
    }
}

/// Returns the element behind `node` only if it is exactly a `<tag>` element.
///
/// The query layer should only hand back matching elements, but the rules
/// don't rely on it.
pub fn element_named<'a>(node: &ElementRef<'a>, tag: &str) -> Option<&'a Element> {
    let element = node.value();
    (element.name() == tag).then_some(element)
}

/// Ordered attribute pairs of a single element.
///
/// Keys may repeat in the source, so the two lookups below make the
/// tie-break explicit.
#[derive(Debug, Clone, Default)]
pub struct Attributes<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Attributes<'a> {
    pub fn of(element: &'a Element) -> Self {
        Self {
            pairs: element.attrs().collect(),
        }
    }

    /// First value for `key` that isn't empty.
    pub fn first_non_empty(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, v)| *k == key && !v.is_empty())
            .map(|(_, v)| *v)
    }

    /// Value of the last `key` pair, empty or not.
    pub fn last(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Attributes<'a> {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}
