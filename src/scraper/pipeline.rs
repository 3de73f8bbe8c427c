//! Aggregator: drives fetch → parse → classify → extract over the whole page
//! and assembles the `ScrapeResult`.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::classify::{classify_row, RateKind};
use super::extract::{extract_auction, extract_market, extract_spot};
use super::fetch::PageSource;
use super::tables::{parse_page, ParsedPage};
use crate::types::{ScrapeDebug, ScrapeResult, ScrapeStatus};

/// Run one full scrape pass for `url` through `source`.
///
/// Only a fetch failure produces `status: Error`. Everything after a
/// successful fetch degrades to smaller (possibly empty) collections — a
/// reachable page with no recognizable rates is still a success.
pub async fn scrape_rates<S: PageSource>(source: &S, url: &str) -> ScrapeResult {
    let fetched_at = Utc::now();

    let page = match source.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            warn!("scrape failed: {}", e);
            return ScrapeResult::error(e.to_string(), fetched_at);
        }
    };
    debug!("fetched {} bytes via {}", page.html.len(), page.via);

    build_result(&parse_page(&page.html), url, fetched_at)
}

/// Classify and extract every row of every table, in document order.
///
/// Emission order into each collection mirrors document order; no
/// re-sorting. A row lands in at most one collection.
pub fn build_result(
    page: &ParsedPage,
    source_url: &str,
    fetched_at: DateTime<Utc>,
) -> ScrapeResult {
    let mut auction_rates = Vec::new();
    let mut market_rates = Vec::new();
    let mut spot_rates = Vec::new();
    let mut row_count = 0;

    for (table_idx, table) in page.tables.iter().enumerate() {
        debug!("{}: headers {:?}", table.id, table.headers);
        for row in &table.rows {
            row_count += 1;
            match classify_row(row) {
                Some(RateKind::Auction) => {
                    if let Some(rate) = extract_auction(row, table_idx, row.index, fetched_at) {
                        auction_rates.push(rate);
                    }
                }
                Some(RateKind::Market) => {
                    if let Some(rate) = extract_market(row, table_idx, row.index, fetched_at) {
                        market_rates.push(rate);
                    }
                }
                Some(RateKind::Spot) => {
                    if let Some(rate) = extract_spot(row, table_idx, row.index, fetched_at) {
                        spot_rates.push(rate);
                    }
                }
                None => {}
            }
        }
    }

    info!(
        "scraped {} tables / {} rows: {} auction, {} market, {} spot",
        page.tables.len(),
        row_count,
        auction_rates.len(),
        market_rates.len(),
        spot_rates.len()
    );

    ScrapeResult {
        auction_rates,
        market_rates,
        spot_rates,
        status: ScrapeStatus::Success,
        message: None,
        fetched_at,
        debug: Some(ScrapeDebug {
            table_count: page.tables.len(),
            row_count,
            title_of_page: page.title.clone(),
            source_url: source_url.to_string(),
        }),
    }
}
