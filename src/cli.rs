// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands:
// - fetch:   download one or more pages and list what they reference
// - extract: same extraction, but from an HTML file already on disk
//
// Every retrieval flag can also be set through a PAGELINKS_* environment
// variable (clap's `env` feature), which is handy in CI.
// =============================================================================

use crate::config::DEFAULT_USER_AGENT;
use crate::fetch::{PageOutcome, PageReport};
use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pagelinks",
    version,
    about = "List the links and assets a web page references",
    long_about = "pagelinks fetches web pages and prints every absolute URL they reference: \
                  navigable links (<a href>) and embedded assets (images, scripts, \
                  stylesheets and shortcut icons). Relative references are resolved against \
                  the page's final URL, fragments are dropped and duplicates removed."
)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", env = "PAGELINKS_LOG")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch web pages and list their links and assets
    ///
    /// Example: pagelinks fetch https://example.com https://example.org --json
    Fetch {
        /// Page URLs to fetch (http or https)
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        fetch: FetchArgs,
    },

    /// Extract links and assets from a local HTML file
    ///
    /// Example: pagelinks extract saved.html --base https://example.com/docs/
    Extract {
        /// Path to the HTML file
        file: PathBuf,

        /// URL the file was downloaded from; relative references resolve against it
        #[arg(long)]
        base: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

/// How results are printed.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct OutputArgs {
    /// Output results in JSON format instead of a listing
    #[arg(long)]
    pub json: bool,

    /// Only print links
    #[arg(long, conflicts_with = "assets_only")]
    pub links_only: bool,

    /// Only print assets
    #[arg(long)]
    pub assets_only: bool,
}

impl OutputArgs {
    /// Drops whichever list the user asked us to hide.
    pub fn apply(&self, report: &mut PageReport) {
        if let PageOutcome::Extracted(result) = &mut report.outcome {
            if self.links_only {
                result.assets.clear();
            }
            if self.assets_only {
                result.links.clear();
            }
        }
    }
}

/// Retrieval settings, turned into a FetchConfig in config.rs.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Request timeout in seconds
    #[arg(long, default_value_t = 10, env = "PAGELINKS_TIMEOUT")]
    pub timeout: u64,

    /// Maximum number of redirects to follow per page
    #[arg(long, default_value_t = 5, env = "PAGELINKS_MAX_REDIRECTS")]
    pub max_redirects: usize,

    /// User-Agent header sent with each request
    #[arg(long, default_value = DEFAULT_USER_AGENT, env = "PAGELINKS_USER_AGENT")]
    pub user_agent: String,

    /// Number of pages fetched concurrently (at least 1)
    #[arg(long, default_value = "8", env = "PAGELINKS_CONCURRENCY")]
    pub concurrency: NonZeroUsize,
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. #[command(flatten)]
//    - Pulls the fields of another Args struct into this subcommand
//    - OutputArgs is shared by both subcommands this way
//
// 2. Why NonZeroUsize for --concurrency?
//    - clap parses it with FromStr, so "0" is rejected before we ever run
//    - No runtime check needed later
// -----------------------------------------------------------------------------
