//! Sitesift main entry point
//!
//! Crawls a site from a seed address, then searches the collected text for a keyword.

use anyhow::Context;
use clap::Parser;
use sitesift::config::{load_config_with_hash, validate, Config};
use sitesift::crawler::{run_crawl, TraversalOrder};
use sitesift::output::{print_crawl_summary, print_results};
use sitesift::url::ScopeRule;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitesift: crawl a site and search its text
///
/// Sitesift visits every page under the seed's origin exactly once, keeps the
/// visible text of each page, and prints the pages containing the keyword.
#[derive(Parser, Debug)]
#[command(name = "sitesift")]
#[command(version)]
#[command(about = "Crawl a site and search its text", long_about = None)]
struct Cli {
    /// Address to start crawling from; also fixes the crawl's origin
    #[arg(value_name = "SEED")]
    seed: Option<String>,

    /// Keyword to search for (case-insensitive substring)
    #[arg(value_name = "KEYWORD")]
    keyword: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Traversal order of the crawl
    #[arg(long, value_enum)]
    order: Option<TraversalOrder>,

    /// Rule deciding which discovered links are followed
    #[arg(long, value_enum)]
    scope: Option<ScopeRule>,

    /// Do not print crawl statistics before the results
    #[arg(long)]
    no_summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    tracing::info!(
        "Crawling from {} ({:?}, {:?} scope)",
        config.session.seed,
        config.crawler.traversal,
        config.crawler.scope
    );

    let (index, report) = run_crawl(&config)
        .await
        .context("Failed to start crawl")?;

    if !cli.no_summary && !cli.quiet {
        print_crawl_summary(&report, &index);
        println!();
    }

    let results = sitesift::search(&index, &config.session.keyword);
    tracing::info!(
        "{} of {} pages match '{}'",
        results.len(),
        index.len(),
        config.session.keyword
    );
    print_results(&results);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitesift=info,warn"),
            1 => EnvFilter::new("sitesift=debug,info"),
            2 => EnvFilter::new("sitesift=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Layers command-line values over the config file over built-in defaults
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(seed) = &cli.seed {
        config.session.seed = seed.clone();
    }
    if let Some(keyword) = &cli.keyword {
        config.session.keyword = keyword.clone();
    }
    if let Some(order) = cli.order {
        config.crawler.traversal = order;
    }
    if let Some(scope) = cli.scope {
        config.crawler.scope = scope;
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}
