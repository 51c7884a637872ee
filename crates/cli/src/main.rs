//! listing-report - generate, filter and analyse vehicle listing prices.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin listing-report -- [CONFIG.json] [--seed N] [--json] [--list]
//! ```
//!
//! ## Environment Variables
//!
//! - RUST_LOG - Logging level (optional, default: info)

mod render;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use listing_analysis::AnalysisEngine;
use listing_core::Config;
use listing_ingestion::ListingGenerator;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file; defaults are used when omitted
    config: Option<PathBuf>,

    /// Seed for a reproducible listing stream
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Print every analysed listing before the report
    #[arg(short, long)]
    list: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let engine = AnalysisEngine::new(&config).context("invalid analysis configuration")?;
    let as_of = Local::now().date_naive();

    let generator = match args.seed {
        Some(seed) => ListingGenerator::seeded(config.source.clone(), as_of, seed),
        None => ListingGenerator::from_entropy(config.source.clone(), as_of),
    }
    .context("invalid source configuration")?;

    info!(
        skip = engine.skip_rule().count(),
        value = engine.skip_rule().value(),
        limit = config.filter.limit,
        %as_of,
        "running analysis"
    );

    let listings = engine.collect(generator);
    if args.list {
        for listing in &listings {
            println!("{}", render::listing_line(listing));
        }
    }

    let report = engine.analyse(&listings, as_of)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::ReportText(&report));
    }

    Ok(())
}
