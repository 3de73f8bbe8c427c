//! Typed rate records produced by the scrape pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gold auction quote (mid rate + premium + sell price with GST annotations).
///
/// `sell`, `m_rate` and `premium` are assigned by magnitude: the source site
/// reports the sell price as the largest number on the row. That is a
/// heuristic observation about the page, not a guarantee of its schema; if
/// the site ever quoted a premium above the base rate the fields would be
/// mis-assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionRate {
    pub id: String,
    pub product: String,
    /// GST percentage as printed in the row label, empty if absent.
    pub gst: String,
    /// "Extra Minimum" quantity as printed in the row label, empty if absent.
    pub extra_minimum: String,
    pub m_rate: f64,
    pub premium: f64,
    pub sell: f64,
    pub last_updated: DateTime<Utc>,
}

/// Product bucket for a market rate row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketCategory {
    #[serde(rename = "gold_995")]
    Gold995,
    #[serde(rename = "gold_auction")]
    GoldAuction,
    #[serde(rename = "gold_current")]
    GoldCurrent,
    #[serde(rename = "silver_999")]
    Silver999,
    #[serde(rename = "silver_current")]
    SilverCurrent,
    #[serde(rename = "other")]
    Other,
}

/// Where a market rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateSource {
    External,
    Manual,
}

/// Generic bid/ask quote for gold or silver, keyed by the row's label text.
///
/// All numeric fields are optional, but a record with none of them set is
/// invalid and the extractor never emits one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketRate {
    pub id: String,
    pub product: String,
    pub category: MarketCategory,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub last_updated: DateTime<Utc>,
    pub source: RateSource,
}

/// Bid/ask/high/low quote from a row explicitly labeled "spot".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotRate {
    pub id: String,
    pub product: String,
    pub bid: f64,
    pub ask: f64,
    pub high: f64,
    pub low: f64,
    pub last_updated: DateTime<Utc>,
}

/// Overall outcome of one scrape pass.
///
/// `Error` means the page could not be fetched at all. A `Success` result
/// with empty collections means the site was reachable but no recognizable
/// rate rows were found — callers must not collapse the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Success,
    Error,
}

/// Diagnostic metadata about the scraped page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeDebug {
    pub table_count: usize,
    pub row_count: usize,
    pub title_of_page: String,
    pub source_url: String,
}

/// The sole externally visible artifact of the pipeline.
///
/// Immutable once constructed; the cache replaces it wholesale on the next
/// successful fetch and never merges partial results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub auction_rates: Vec<AuctionRate>,
    pub market_rates: Vec<MarketRate>,
    pub spot_rates: Vec<SpotRate>,
    pub status: ScrapeStatus,
    pub message: Option<String>,
    pub fetched_at: DateTime<Utc>,
    pub debug: Option<ScrapeDebug>,
}

impl ScrapeResult {
    /// Build an error result with empty collections.
    pub fn error(message: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            auction_rates: Vec::new(),
            market_rates: Vec::new(),
            spot_rates: Vec::new(),
            status: ScrapeStatus::Error,
            message: Some(message.into()),
            fetched_at,
            debug: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ScrapeStatus::Success
    }

    /// Total number of extracted rate records across all three collections.
    pub fn record_count(&self) -> usize {
        self.auction_rates.len() + self.market_rates.len() + self.spot_rates.len()
    }
}
