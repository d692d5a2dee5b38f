//! Kumo main entry point
//!
//! Command-line driver for the kumo wiki crawler: loads a TOML
//! configuration, steps the crawler until the frontier empties or the page
//! budget is spent, and optionally reports term counts from the index.

use anyhow::Context;
use clap::Parser;
use kumo::config::load_config_with_hash;
use kumo::crawler::{build_http_client, WikiSource};
use kumo::index::{Index, SqliteIndex};
use kumo::{Crawler, StepOutcome};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Kumo: a frontier-based wiki crawler and term indexer
#[derive(Parser, Debug)]
#[command(name = "kumo")]
#[command(version)]
#[command(about = "A frontier-based wiki crawler and term indexer", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Delete the existing index database before crawling
    #[arg(long)]
    fresh: bool,

    /// Crawl deterministically from the bundled fixture content,
    /// bypassing the index dedup check
    #[arg(long)]
    test_mode: bool,

    /// Override the configured page budget
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Print per-location occurrence counts for TERM after the crawl
    #[arg(long, value_name = "TERM")]
    query: Option<String>,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let db_path = Path::new(&config.output.database_path);
    if cli.fresh && db_path.exists() {
        tracing::info!("Removing existing index at {}", db_path.display());
        std::fs::remove_file(db_path)?;
    }

    let max_pages = cli.max_pages.unwrap_or(config.crawl.max_pages);

    let client = build_http_client(&config.user_agent)?;
    let source = WikiSource::new(client, config.collection.clone());
    let index = SqliteIndex::open(db_path)?;

    let mut crawler = Crawler::new(
        config.crawl.seed.clone(),
        source,
        index,
        config.collection.clone(),
    );

    tracing::info!(
        "Starting crawl from {} (budget: {} pages{})",
        config.crawl.seed,
        max_pages,
        if cli.test_mode { ", test mode" } else { "" }
    );

    let mut processed = 0u32;
    while processed < max_pages && crawler.frontier_size() > 0 {
        match crawler.step(cli.test_mode).await? {
            StepOutcome::Processed(location) => {
                processed += 1;
                tracing::info!("Indexed {} ({}/{})", location, processed, max_pages);
            }
            StepOutcome::Skipped => {}
        }
    }

    tracing::info!(
        "Crawl finished: {} pages indexed this run, {} total in index, {} locations left in frontier",
        processed,
        crawler.index().page_count()?,
        crawler.frontier_size()
    );

    if let Some(term) = &cli.query {
        print_term_counts(crawler.index(), term)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo=info,warn"),
            1 => EnvFilter::new("kumo=debug,info"),
            2 => EnvFilter::new("kumo=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &kumo::Config) {
    println!("=== Kumo Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed: {}", config.crawl.seed);
    println!("  Page budget: {}", config.crawl.max_pages);

    println!("\nCollection:");
    println!("  Base address: {}", config.collection.base_address);
    println!("  Internal prefix: {}", config.collection.internal_prefix);
    if let Some(root) = &config.collection.content_root {
        println!("  Content root: {}", root);
    }

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);

    println!("\n✓ Configuration is valid");
}

/// Prints the per-location occurrence counts for a term, most frequent first
fn print_term_counts(index: &impl Index, term: &str) -> anyhow::Result<()> {
    let counts = index.term_counts(term)?;

    if counts.is_empty() {
        println!("No occurrences of {:?} in the index", term);
        return Ok(());
    }

    println!("Occurrences of {:?}:", term);
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (location, count) in entries {
        println!("{:>8}  {}", count, location);
    }

    Ok(())
}
