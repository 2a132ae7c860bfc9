// src/extract/rules.rs
// =============================================================================
// Walks a parsed page and collects two deduplicated lists of absolute URLs:
//
// - links:  every <a href> on the page
// - assets: <img src>, <script src>, and <link href> when it's a CSS
//           stylesheet or a shortcut icon
//
// Each node goes through a small rule function that returns Option: a node
// that isn't what we expected, or lacks the attribute we need, just yields
// None. Nothing here can fail the whole extraction.
// =============================================================================

use super::document::{element_named, Attributes, ParsedDocument};
use super::normalize::{normalize, ResolvedUrl};
use scraper::ElementRef;
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;
use url::Url;

/// Which rule produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    Link,
    Image,
    Script,
    Stylesheet,
    Icon,
}

/// A raw attribute value before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub kind: CandidateKind,
    pub raw: &'a str,
}

/// Counts kept alongside the results so callers can tell "the page had no
/// anchors" apart from "every anchor was rejected".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub link_candidates: usize,
    pub asset_candidates: usize,
    /// Candidates whose URL failed to parse.
    pub rejected: usize,
}

/// Everything one page references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub links: Vec<ResolvedUrl>,
    pub assets: Vec<ResolvedUrl>,
    pub stats: ExtractionStats,
}

/// Extracts links and assets from `doc`.
///
/// Pure and total: the same document always gives the same result, and bad
/// nodes or URLs are skipped rather than reported.
pub fn extract(doc: &ParsedDocument) -> ExtractionResult {
    let base = doc.origin();

    let links = link_candidates(doc);
    let assets = asset_candidates(doc);

    let mut stats = ExtractionStats {
        link_candidates: links.len(),
        asset_candidates: assets.len(),
        rejected: 0,
    };

    let resolved_links = resolve_all(base, links);
    let resolved_assets = resolve_all(base, assets);
    stats.rejected = (stats.link_candidates - resolved_links.len())
        + (stats.asset_candidates - resolved_assets.len());

    let result = ExtractionResult {
        links: dedupe(resolved_links),
        assets: dedupe(resolved_assets),
        stats,
    };

    debug!(
        origin = %base,
        links = result.links.len(),
        assets = result.assets.len(),
        link_candidates = stats.link_candidates,
        asset_candidates = stats.asset_candidates,
        rejected = stats.rejected,
        "extracted page references"
    );

    result
}

/// Raw `href` values of every anchor, in document order.
pub fn link_candidates(doc: &ParsedDocument) -> Vec<Candidate<'_>> {
    doc.query("a").iter().filter_map(anchor_href).collect()
}

/// Raw asset references: images, then scripts, then stylesheet/icon links.
pub fn asset_candidates(doc: &ParsedDocument) -> Vec<Candidate<'_>> {
    let images = doc
        .query("img")
        .into_iter()
        .filter_map(|node| src_of(&node, CandidateKind::Image));
    let scripts = doc
        .query("script")
        .into_iter()
        .filter_map(|node| src_of(&node, CandidateKind::Script));
    let resources = doc.query("link").into_iter().filter_map(|node| link_resource(&node));

    images.chain(scripts).chain(resources).collect()
}

/// Order-preserving uniqueness filter. The first occurrence of each URL wins.
pub fn dedupe<I>(urls: I) -> Vec<ResolvedUrl>
where
    I: IntoIterator<Item = ResolvedUrl>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| seen.insert(url.as_str().to_owned()))
        .collect()
}

fn resolve_all(base: &Url, candidates: Vec<Candidate<'_>>) -> Vec<ResolvedUrl> {
    candidates
        .into_iter()
        .filter_map(|c| {
            let resolved = normalize(base, c.raw);
            if resolved.is_none() {
                debug!(kind = ?c.kind, raw = c.raw, "dropped candidate");
            }
            resolved
        })
        .collect()
}

fn anchor_href<'a>(node: &ElementRef<'a>) -> Option<Candidate<'a>> {
    let Some(element) = element_named(node, "a") else {
        debug!(tag = node.value().name(), "node is not an anchor");
        return None;
    };

    Attributes::of(element)
        .first_non_empty("href")
        .map(|raw| Candidate {
            kind: CandidateKind::Link,
            raw,
        })
}

fn src_of<'a>(node: &ElementRef<'a>, kind: CandidateKind) -> Option<Candidate<'a>> {
    Attributes::of(node.value())
        .first_non_empty("src")
        .map(|raw| Candidate { kind, raw })
}

// <link> only counts for two combinations:
//   rel="stylesheet" + type="text/css"
//   rel="shortcut icon"
// Anything else (alternate, preload, canonical, ...) is not a page asset.
fn link_resource<'a>(node: &ElementRef<'a>) -> Option<Candidate<'a>> {
    let attrs = Attributes::of(node.value());
    let raw = attrs.last("href")?;

    let kind = match (attrs.last("rel"), attrs.last("type")) {
        (Some("stylesheet"), Some("text/css")) => CandidateKind::Stylesheet,
        (Some("shortcut icon"), _) => CandidateKind::Icon,
        _ => return None,
    };

    Some(Candidate { kind, raw })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(markup: &str, base: &str) -> ParsedDocument {
        ParsedDocument::parse(markup, Url::parse(base).unwrap())
    }

    fn strings(urls: &[ResolvedUrl]) -> Vec<&str> {
        urls.iter().map(ResolvedUrl::as_str).collect()
    }

    #[test]
    fn test_links_resolve_and_dedupe_fragment_variant() {
        let document = doc(
            r#"<a href="/a">A</a><a href="b">B</a><a href="/a#x">A again</a>"#,
            "http://example.com/dir/",
        );
        let result = extract(&document);
        assert_eq!(
            strings(&result.links),
            vec!["http://example.com/a", "http://example.com/dir/b"]
        );
    }

    #[test]
    fn test_stylesheet_kept_alternate_excluded() {
        let document = doc(
            r#"<head>
                <link rel="stylesheet" type="text/css" href="s.css">
                <link rel="alternate" href="feed.xml">
            </head>"#,
            "http://x.com/",
        );
        let result = extract(&document);
        assert_eq!(strings(&result.assets), vec!["http://x.com/s.css"]);
    }

    #[test]
    fn test_empty_src_and_missing_src_skipped() {
        let document = doc(
            r#"<img src=""><script>console.log("inline")</script>"#,
            "http://x.com/",
        );
        let result = extract(&document);
        assert!(result.assets.is_empty());
        assert_eq!(result.stats.asset_candidates, 0);
    }

    #[test]
    fn test_stylesheet_needs_css_type() {
        let document = doc(
            r#"<link rel="stylesheet" href="no-type.css">
               <link rel="stylesheet" type="text/less" href="less.less">
               <link rel="preload" type="text/css" href="preload.css">"#,
            "http://x.com/",
        );
        assert!(extract(&document).assets.is_empty());
    }

    #[test]
    fn test_shortcut_icon_any_type() {
        let document = doc(
            r#"<link rel="shortcut icon" href="/favicon.ico">
               <link rel="icon" href="/other.ico">"#,
            "http://x.com/page",
        );
        let result = extract(&document);
        assert_eq!(strings(&result.assets), vec!["http://x.com/favicon.ico"]);
    }

    #[test]
    fn test_link_without_href_skipped() {
        let document = doc(
            r#"<link rel="shortcut icon"><link rel="stylesheet" type="text/css">"#,
            "http://x.com/",
        );
        assert!(asset_candidates(&document).is_empty());
    }

    #[test]
    fn test_asset_order_images_scripts_links() {
        let document = doc(
            r#"<link rel="stylesheet" type="text/css" href="/style.css">
               <script src="/app.js"></script>
               <img src="/logo.png">"#,
            "http://x.com/",
        );
        let kinds: Vec<_> = asset_candidates(&document).iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                CandidateKind::Image,
                CandidateKind::Script,
                CandidateKind::Stylesheet
            ]
        );
        assert_eq!(
            strings(&extract(&document).assets),
            vec![
                "http://x.com/logo.png",
                "http://x.com/app.js",
                "http://x.com/style.css"
            ]
        );
    }

    #[test]
    fn test_repeated_href_kept_once_at_first_position() {
        let document = doc(
            r#"<a href="/one">1</a><a href="/dup">2</a><a href="/two">3</a>
               <a href="/dup">4</a><a href="http://x.com/dup">5</a>"#,
            "http://x.com/",
        );
        let result = extract(&document);
        assert_eq!(
            strings(&result.links),
            vec!["http://x.com/one", "http://x.com/dup", "http://x.com/two"]
        );
        assert_eq!(result.stats.link_candidates, 5);
    }

    #[test]
    fn test_same_url_in_links_and_assets() {
        let document = doc(
            r#"<a href="/logo.png">logo</a><img src="/logo.png"><img src="logo.png">"#,
            "http://x.com/",
        );
        let result = extract(&document);
        assert_eq!(strings(&result.links), vec!["http://x.com/logo.png"]);
        assert_eq!(strings(&result.assets), vec!["http://x.com/logo.png"]);
    }

    #[test]
    fn test_anchor_without_href_or_empty_href_skipped() {
        let document = doc(
            r#"<a name="top">top</a><a href="">empty</a><a href="/ok">ok</a>"#,
            "http://x.com/",
        );
        let candidates = link_candidates(&document);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].raw, "/ok");
        assert_eq!(candidates[0].kind, CandidateKind::Link);
    }

    #[test]
    fn test_malformed_url_dropped_rest_kept() {
        let document = doc(
            r#"<a href="http://[">bad</a><a href="/good">good</a>
               <img src="http://exa mple.com/x.png"><img src="/y.png">"#,
            "http://x.com/",
        );
        let result = extract(&document);
        assert_eq!(strings(&result.links), vec!["http://x.com/good"]);
        assert_eq!(strings(&result.assets), vec!["http://x.com/y.png"]);
        assert_eq!(result.stats.rejected, 2);
    }

    #[test]
    fn test_no_anchors_vs_all_rejected() {
        let empty = extract(&doc("<p>plain</p>", "http://x.com/"));
        assert!(empty.links.is_empty());
        assert_eq!(empty.stats, ExtractionStats::default());

        let rejected = extract(&doc(r#"<a href="http://[">bad</a>"#, "http://x.com/"));
        assert!(rejected.links.is_empty());
        assert_eq!(rejected.stats.link_candidates, 1);
        assert_eq!(rejected.stats.rejected, 1);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let document = doc(
            r#"<a href="/a">a</a><a href="c#x">c</a><img src="i.png">
               <script src="//cdn.x.com/s.js"></script>
               <link rel="shortcut icon" href="/f.ico">"#,
            "https://x.com/docs/",
        );
        assert_eq!(extract(&document), extract(&document));
    }

    #[test]
    fn test_non_http_schemes_pass_through() {
        let document = doc(
            r#"<a href="mailto:someone@example.com">mail</a>"#,
            "http://x.com/",
        );
        assert_eq!(
            strings(&extract(&document).links),
            vec!["mailto:someone@example.com"]
        );
    }

    #[test]
    fn test_dedupe_is_stable() {
        let base = Url::parse("http://x.com/").unwrap();
        let urls: Vec<_> = ["/c", "/a", "/c", "/b", "/a"]
            .iter()
            .filter_map(|p| normalize(&base, p))
            .collect();
        assert_eq!(
            strings(&dedupe(urls)),
            vec!["http://x.com/c", "http://x.com/a", "http://x.com/b"]
        );
    }

    #[test]
    fn test_result_serializes_urls_as_strings() {
        let document = doc(r#"<a href="/a">a</a>"#, "http://x.com/");
        let json = serde_json::to_value(extract(&document)).unwrap();
        assert_eq!(json["links"][0], "http://x.com/a");
        assert_eq!(json["stats"]["link_candidates"], 1);
    }
}
