// src/config.rs
// =============================================================================
// Settings for page retrieval.
//
// Values come from command-line flags, which fall back to PAGELINKS_*
// environment variables (see cli.rs). Anything not given uses the defaults
// below.
// =============================================================================

use crate::cli::FetchArgs;
use std::time::Duration;

/// User agent sent with every request, e.g. "pagelinks/0.1.0".
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Per-request timeout, covering connect through reading the body
    pub timeout: Duration,
    /// Redirects followed before giving up
    pub max_redirects: usize,
    pub user_agent: String,
    /// How many pages are fetched at the same time
    pub concurrency: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: 8,
        }
    }
}

impl From<&FetchArgs> for FetchConfig {
    fn from(args: &FetchArgs) -> Self {
        Self {
            timeout: Duration::from_secs(args.timeout),
            max_redirects: args.max_redirects,
            user_agent: args.user_agent.clone(),
            concurrency: args.concurrency.get(),
        }
    }
}
