// src/extract/mod.rs
// =============================================================================
// Link and asset extraction for a single parsed page.
//
// Submodules:
// - document: the parsed page (scraper tree + origin URL) and attribute lookups
// - normalize: raw attribute value -> absolute, fragment-free URL
// - rules: which tags/attributes count as links or assets, plus dedup
//
// Everything in here is synchronous and side-effect free apart from debug
// logging, so pages can be processed in parallel without coordination.
// =============================================================================

mod document;
mod normalize;
mod rules;

pub use document::ParsedDocument;
pub use rules::{extract, ExtractionResult};
