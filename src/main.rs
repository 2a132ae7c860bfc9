// src/main.rs
// =============================================================================
// Entry point of the pagelinks CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr)
// 3. Dispatch to the subcommand handler
// 4. Print results as a listing or JSON
// 5. Exit with proper code (0 = all pages extracted, 1 = a page failed,
//    2 = error)
// =============================================================================

mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - retrieval settings
mod extract;  // src/extract/ - link and asset extraction
mod fetch;    // src/fetch/ - getting pages from the network or disk
mod logging;  // src/logging.rs - tracing setup

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, OutputArgs};
use config::FetchConfig;
use fetch::{HttpFetcher, PageOutcome, PageReport};
use std::path::Path;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = every page was extracted
//   Ok(1) = at least one page could not be fetched
//   Err   = bad input or unexpected error (exit code 2)
async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Fetch { urls, output, fetch } => {
            handle_fetch(&urls, output, FetchConfig::from(&fetch)).await
        }
        Commands::Extract { file, base, output } => handle_extract(&file, &base, output).await,
    }
}

// Handles the 'fetch' subcommand
async fn handle_fetch(urls: &[String], output: OutputArgs, config: FetchConfig) -> Result<i32> {
    let targets = urls
        .iter()
        .map(|u| fetch::parse_target(u))
        .collect::<Result<Vec<_>, _>>()?;

    let fetcher = HttpFetcher::new(&config)?;
    let reports = fetcher.fetch_all(targets).await;

    let failed = reports.iter().filter(|r| !r.is_ok()).count();
    tracing::info!(pages = reports.len(), failed, "done");

    print_reports(reports, output)?;

    Ok(if failed > 0 { 1 } else { 0 })
}

// Handles the 'extract' subcommand
async fn handle_extract(file: &Path, base: &str, output: OutputArgs) -> Result<i32> {
    let origin = url::Url::parse(base).with_context(|| format!("invalid base URL '{}'", base))?;

    let document = fetch::read_document(file, origin).await?;
    let result = extract::extract(&document);

    let report = PageReport {
        url: base.to_string(),
        outcome: PageOutcome::Extracted(result),
    };
    print_reports(vec![report], output)?;

    Ok(0)
}

fn print_reports(mut reports: Vec<PageReport>, output: OutputArgs) -> Result<()> {
    for report in &mut reports {
        output.apply(report);
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_listing(report, output);
        }
    }
    Ok(())
}

// Prints one page as a human-readable listing
fn print_listing(report: &PageReport, output: OutputArgs) {
    println!("📄 {}", report.url);

    match &report.outcome {
        PageOutcome::Failed { error } => {
            println!("   ❌ {}", error);
        }
        PageOutcome::Extracted(result) => {
            if !output.assets_only {
                println!("   🔗 Links ({})", result.links.len());
                for link in &result.links {
                    println!("      {}", link);
                }
            }
            if !output.links_only {
                println!("   📦 Assets ({})", result.assets.len());
                for asset in &result.assets {
                    println!("      {}", asset);
                }
            }
            if result.stats.rejected > 0 {
                println!("   ⚠️  {} reference(s) skipped (unparseable URL)", result.stats.rejected);
            }
        }
    }

    println!();
}
