//! Bullion rate scraper
//!
//! CLI over the rate-extraction engine: fetches the trading site's live
//! page and recovers auction, market and spot quotes from its unlabeled
//! tables.

mod cli;
mod config;
mod scraper;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bullion_rates=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Live { format } => cli::run_live(format).await,
        Commands::Cached { format } => cli::run_cached(format).await,
    }
}
