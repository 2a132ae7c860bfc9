// src/extract/normalize.rs
// =============================================================================
// Turns a raw attribute value into an absolute URL.
//
// Steps:
// 1. Cut the fragment off at the first '#'
// 2. Resolve what's left against the page's origin URL
// 3. Give up quietly (None) if it doesn't parse
//
// We use the `url` crate for resolution. Url::join follows the same rules a
// browser uses for relative references, so "/a", "b", "../c" and
// "//cdn.example.com/x.js" all come out absolute.
// =============================================================================

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;
use url::Url;

/// An absolute URL with no fragment.
///
/// Two values are equal exactly when their string forms are equal.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedUrl(Url);

impl ResolvedUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Logs as the plain URL string rather than every parsed component.
impl fmt::Debug for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl fmt::Display for ResolvedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResolvedUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl From<ResolvedUrl> for Url {
    fn from(resolved: ResolvedUrl) -> Self {
        resolved.0
    }
}

/// Resolves `raw` against `base`.
///
/// Returns None when the fragment-free part of `raw` is not a valid URL
/// reference. Never panics.
///
/// Examples (base = "http://example.com/dir/"):
///   "/a"                  -> "http://example.com/a"
///   "b"                   -> "http://example.com/dir/b"
///   "/a#top"              -> "http://example.com/a"
///   "https://x.org/#frag" -> "https://x.org/"
///   "http://["            -> None
pub fn normalize(base: &Url, raw: &str) -> Option<ResolvedUrl> {
    let reference = strip_fragment(raw);

    match base.join(reference) {
        Ok(url) => Some(ResolvedUrl(url)),
        Err(e) => {
            debug!(raw, error = %e, "failed to parse URL");
            None
        }
    }
}

fn strip_fragment(raw: &str) -> &str {
    match raw.find('#') {
        Some(i) => &raw[..i],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/dir/").unwrap()
    }

    fn norm(raw: &str) -> Option<String> {
        normalize(&base(), raw).map(|u| u.to_string())
    }

    #[test]
    fn test_root_relative() {
        assert_eq!(norm("/a"), Some("http://example.com/a".to_string()));
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(norm("b"), Some("http://example.com/dir/b".to_string()));
        assert_eq!(norm("../up"), Some("http://example.com/up".to_string()));
    }

    #[test]
    fn test_scheme_relative_keeps_base_scheme() {
        assert_eq!(
            norm("//cdn.example.net/app.js"),
            Some("http://cdn.example.net/app.js".to_string())
        );
    }

    #[test]
    fn test_absolute_is_unchanged() {
        assert_eq!(
            norm("https://other.org/path?q=1"),
            Some("https://other.org/path?q=1".to_string())
        );
    }

    #[test]
    fn test_fragment_has_no_effect() {
        for s in ["https://other.org/page", "http://example.com/a?b=c", "/rel", "x/y"] {
            assert_eq!(norm(&format!("{s}#frag")), norm(s), "input {s}");
        }
    }

    #[test]
    fn test_fragment_cut_at_first_hash() {
        assert_eq!(norm("/a#b#c"), Some("http://example.com/a".to_string()));
    }

    #[test]
    fn test_fragment_only_resolves_to_base() {
        assert_eq!(norm("#top"), Some("http://example.com/dir/".to_string()));
    }

    #[test]
    fn test_relative_inherits_scheme_and_authority() {
        let base = Url::parse("https://user@example.com:8443/docs/index.html").unwrap();
        for p in ["a", "/b", "../c", "d/e?f=g"] {
            let url = Url::from(normalize(&base, p).unwrap());
            assert_eq!(url.scheme(), base.scheme());
            assert_eq!(url.username(), base.username());
            assert_eq!(url.host_str(), base.host_str());
            assert_eq!(url.port(), base.port());
        }
    }

    #[test]
    fn test_malformed_is_none() {
        assert_eq!(norm("http://["), None);
        assert_eq!(norm("http://exa mple.com/"), None);
        assert_eq!(norm("https://example.com:99999/"), None);
    }

    #[test]
    fn test_base_fragment_not_inherited() {
        let base = Url::parse("http://example.com/page#section").unwrap();
        let resolved = normalize(&base, "").unwrap();
        assert_eq!(resolved.as_str(), "http://example.com/page");
    }

    #[test]
    fn test_debug_is_the_url_string() {
        let resolved = normalize(&base(), "/a").unwrap();
        assert_eq!(format!("{resolved:?}"), r#""http://example.com/a""#);
        assert_eq!(
            format!("{:?}", vec![resolved]),
            r#"["http://example.com/a"]"#
        );
    }

    #[test]
    fn test_serializes_as_string() {
        let resolved = normalize(&base(), "/a").unwrap();
        assert_eq!(
            serde_json::to_string(&resolved).unwrap(),
            r#""http://example.com/a""#
        );
    }
}
