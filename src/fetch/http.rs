// src/fetch/http.rs
// =============================================================================
// Fetches pages over HTTP(S) and extracts their links and assets.
//
// Key functionality:
// - One reqwest Client shared by every request (connection pooling)
// - Redirects are followed; the final URL becomes the page's origin, so
//   relative links resolve the way a browser would resolve them
// - Non-2xx responses and transport failures become FetchError values
// - Several pages run concurrently, capped by FetchConfig::concurrency
//
// Each page is handled on its own: one failing page never affects another.
// =============================================================================

use super::FetchError;
use crate::config::FetchConfig;
use crate::extract::{extract, ExtractionResult, ParsedDocument};
use futures::stream::{self, StreamExt};
use reqwest::{redirect, Client};
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

/// Result for one requested page.
#[derive(Debug, Serialize)]
pub struct PageReport {
    /// The URL as requested (before redirects)
    pub url: String,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    Extracted(ExtractionResult),
    Failed { error: String },
}

impl PageReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Extracted(_))
    }
}

/// Parses a user-supplied page URL, accepting only http and https.
pub fn parse_target(input: &str) -> Result<Url, FetchError> {
    let url = Url::parse(input).map_err(|source| FetchError::InvalidUrl {
        input: input.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

pub struct HttpFetcher {
    client: Client,
    concurrency: usize,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            concurrency: config.concurrency.max(1),
        })
    }

    /// Downloads `target` and parses it. The document's origin is the URL we
    /// ended up at after redirects.
    pub async fn fetch_document(&self, target: &Url) -> Result<ParsedDocument, FetchError> {
        let response = self
            .client
            .get(target.clone())
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let origin = response.url().clone();
        if origin != *target {
            debug!(from = %target, to = %origin, "followed redirect");
        }

        let markup = response.text().await.map_err(FetchError::from_transport)?;
        Ok(ParsedDocument::parse(&markup, origin))
    }

    /// Fetches one page and extracts everything it references.
    pub async fn fetch(&self, target: &Url) -> Result<ExtractionResult, FetchError> {
        let document = self.fetch_document(target).await?;
        let result = extract(&document);

        debug!(url = %target, links = ?result.links, "links");
        debug!(url = %target, assets = ?result.assets, "assets");

        Ok(result)
    }

    /// Fetches every target, at most `concurrency` at a time.
    ///
    /// Reports come back in the same order as `targets`.
    pub async fn fetch_all(&self, targets: Vec<Url>) -> Vec<PageReport> {
        let futures = targets.into_iter().map(|target| async move {
            info!(url = %target, "fetching page");

            let outcome = match self.fetch(&target).await {
                Ok(result) => PageOutcome::Extracted(result),
                Err(e) => {
                    warn!(url = %target, error = %e, "failed to fetch page");
                    PageOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            PageReport {
                url: target.to_string(),
                outcome,
            }
        });

        // buffered (not buffer_unordered) keeps reports in input order
        stream::iter(futures)
            .buffered(self.concurrency)
            .collect()
            .await
    }
}
