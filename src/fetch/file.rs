// src/fetch/file.rs
// =============================================================================
// Loads a saved HTML page from disk so it can be extracted offline.
//
// The caller supplies the origin URL, since a file has no URL of its own that
// relative references could be resolved against.
//
// Saved pages aren't always UTF-8 (Latin-1, Windows-1252...). Invalid bytes
// become U+FFFD, the same way reqwest's Response::text() treats them.
// =============================================================================

use super::FetchError;
use crate::extract::ParsedDocument;
use std::path::Path;
use url::Url;

pub async fn read_document(path: &Path, origin: Url) -> Result<ParsedDocument, FetchError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| FetchError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ParsedDocument::parse(&String::from_utf8_lossy(&bytes), origin))
}
