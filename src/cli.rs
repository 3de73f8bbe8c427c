//! CLI commands for bullion-rates.
//!
//! Thin consumption layer over the rate service: fetch live or cached rates
//! and print them as JSON or a table.

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::scraper::{HttpSource, RateCache, RateService};
use crate::types::{ScrapeResult, ScrapeStatus};

#[derive(Parser)]
#[command(name = "bullion-rates")]
#[command(version, about = "Bullion rate scraper for the trading site's live page", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch rates from the site, bypassing the cache
    Live {
        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Serve rates from the cache while fresh
    Cached {
        /// Output format (json, table)
        #[arg(short, long, default_value = "json")]
        format: String,
    },
}

/// Fetch live rates and print them.
pub async fn run_live(format: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;
    let result = service.fetch_live_rates().await;
    print_result(&result, &format)
}

/// Fetch rates through the cache wrapper and print them.
pub async fn run_cached(format: String) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let service = build_service(&config)?;
    let result = service.get_rates_with_cache().await;
    print_result(&result, &format)
}

fn build_service(config: &AppConfig) -> anyhow::Result<RateService<HttpSource>> {
    let source = HttpSource::new(config.scraper.request_timeout())?;
    let cache = RateCache::new(config.scraper.cache_freshness());
    Ok(RateService::new(
        source,
        cache,
        config.scraper.source_url.clone(),
    ))
}

fn print_result(result: &ScrapeResult, format: &str) -> anyhow::Result<()> {
    match format {
        "table" => print_table(result),
        _ => println!("{}", serde_json::to_string_pretty(result)?),
    }
    Ok(())
}

fn print_table(result: &ScrapeResult) {
    if result.status == ScrapeStatus::Error {
        // Distinct from a reachable page with no rates on it.
        println!(
            "no data available, try again later: {}",
            result.message.as_deref().unwrap_or("unknown error")
        );
        return;
    }

    println!("fetched at {}", result.fetched_at);

    if !result.auction_rates.is_empty() {
        println!("\nAuction rates");
        for rate in &result.auction_rates {
            println!(
                "  {:<45} sell {:>10.2}  m.rate {:>8.2}  premium {:>8.2}",
                rate.product, rate.sell, rate.m_rate, rate.premium
            );
        }
    }

    if !result.market_rates.is_empty() {
        println!("\nMarket rates");
        for rate in &result.market_rates {
            println!(
                "  {:<45} bid {:>10}  ask {:>10}  high {:>10}  low {:>10}",
                rate.product,
                fmt_opt(rate.bid),
                fmt_opt(rate.ask),
                fmt_opt(rate.high),
                fmt_opt(rate.low)
            );
        }
    }

    if !result.spot_rates.is_empty() {
        println!("\nSpot rates");
        for rate in &result.spot_rates {
            println!(
                "  {:<45} bid {:>10.2}  ask {:>10.2}  high {:>10.2}  low {:>10.2}",
                rate.product, rate.bid, rate.ask, rate.high, rate.low
            );
        }
    }

    if result.record_count() == 0 {
        println!("site reachable, no recognizable rates today");
    }
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_else(|| "-".to_string())
}
