// src/fetch/error.rs
// =============================================================================
// Errors from page retrieval.
//
// Extraction itself never fails, so these only ever describe the transport
// (or the local file) that was supposed to hand us a page.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{0}' (only http and https can be fetched)")]
    UnsupportedScheme(String),

    #[error("request timed out")]
    Timeout,

    #[error("too many redirects")]
    TooManyRedirects,

    #[error("could not resolve hostname")]
    Dns,

    #[error("connection failed")]
    Connect,

    #[error("HTTP {0}")]
    Status(u16),

    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Other(String),
}

impl FetchError {
    /// Sorts a reqwest transport error into one of our variants.
    pub fn from_transport(error: reqwest::Error) -> Self {
        // reqwest keeps the interesting part (dns, certificate, ...) in the
        // source chain, so look at all of it.
        let chain = error_chain(&error);

        if error.is_timeout() {
            Self::Timeout
        } else if error.is_redirect() {
            Self::TooManyRedirects
        } else if error.is_connect() {
            if chain.to_lowercase().contains("dns") {
                Self::Dns
            } else {
                Self::Connect
            }
        } else {
            Self::Other(chain)
        }
    }
}

fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
