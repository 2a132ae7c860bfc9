// src/fetch/mod.rs
// =============================================================================
// Getting pages into a ParsedDocument.
//
// Submodules:
// - http: downloads pages with reqwest (following redirects) and runs the
//         extractor on them, several pages at a time
// - file: reads a saved HTML file from disk
// - error: what can go wrong while retrieving a page
// =============================================================================

mod error;
mod file;
mod http;

pub use error::FetchError;
pub use file::read_document;
pub use http::{parse_target, HttpFetcher, PageOutcome, PageReport};
