//! Field extractors: map a classified row's numeric tokens onto named fields.
//!
//! Each extractor is a pure function of the row plus its table/row position
//! (used only to build diagnostic ids) and the scrape timestamp. Mis-shaped
//! rows return `None` instead of erroring — heuristic noise is the expected
//! common case, not an exceptional one.
//!
//! Quote values are read from the cells after the first one: the label cell's
//! embedded digits (purity codes, GST notes, minimum quantities) describe the
//! product, not the quote.

use chrono::{DateTime, Utc};
use regex::Regex;

use super::tables::RawRow;
use crate::types::{AuctionRate, MarketCategory, MarketRate, RateSource, SpotRate};

/// Numeric tokens from the value cells, flattened in row order.
fn quote_numbers(row: &RawRow) -> Vec<f64> {
    row.cells
        .iter()
        .skip(1)
        .flat_map(|c| c.numbers.iter().copied())
        .collect()
}

fn product_label(row: &RawRow) -> String {
    row.cells
        .first()
        .map(|c| c.text.clone())
        .unwrap_or_default()
}

/// Extract an auction rate. Needs at least 3 quote tokens.
///
/// Assignment is by magnitude: sell takes the largest token, the mid rate
/// the second largest, the premium the smallest of the whole list. The site
/// has always quoted them in that magnitude order; nothing in its markup
/// guarantees it will keep doing so.
pub fn extract_auction(
    row: &RawRow,
    table_idx: usize,
    row_idx: usize,
    now: DateTime<Utc>,
) -> Option<AuctionRate> {
    let mut numbers = quote_numbers(row);
    if numbers.len() < 3 {
        return None;
    }
    numbers.sort_by(|a, b| b.total_cmp(a));

    let sell = numbers[0];
    let m_rate = numbers[1];
    let premium = numbers[numbers.len() - 1];

    let label = row.first_cell_text();
    let gst = capture_first(&label, r"gst\s*(\d+\.?\d*)");
    let extra_minimum = capture_first(&label, r"extra\s+minimum\s+(\d+)");

    Some(AuctionRate {
        id: format!("auction-{table_idx}-{row_idx}"),
        product: product_label(row),
        gst,
        extra_minimum,
        m_rate,
        premium,
        sell,
        last_updated: now,
    })
}

/// Extract a market rate. Needs at least 1 quote token.
pub fn extract_market(
    row: &RawRow,
    table_idx: usize,
    row_idx: usize,
    now: DateTime<Utc>,
) -> Option<MarketRate> {
    let mut numbers = quote_numbers(row);
    if numbers.is_empty() {
        return None;
    }
    numbers.sort_by(f64::total_cmp);

    let first = numbers[0];
    let last = numbers[numbers.len() - 1];

    let (bid, ask, high, low) = match numbers.len() {
        1 => (first, first, first, first),
        // Labeled inconsistently on the page; two or three tokens read as a
        // plain bid/ask pair with the extremes as the day's range.
        2 | 3 => (numbers[0], numbers[1], last, first),
        _ => (numbers[1], numbers[2], last, first),
    };

    Some(MarketRate {
        id: format!("market-{table_idx}-{row_idx}"),
        product: product_label(row),
        category: derive_category(&row.first_cell_text()),
        bid: Some(bid),
        ask: Some(ask),
        high: Some(high),
        low: Some(low),
        last_updated: now,
        source: RateSource::External,
    })
}

/// Extract a spot rate. Needs at least 2 quote tokens.
pub fn extract_spot(
    row: &RawRow,
    table_idx: usize,
    row_idx: usize,
    now: DateTime<Utc>,
) -> Option<SpotRate> {
    let mut numbers = quote_numbers(row);
    if numbers.len() < 2 {
        return None;
    }
    numbers.sort_by(f64::total_cmp);

    let bid = numbers[0];
    // Unreachable fallback given the length check above.
    let ask = numbers.get(1).copied().unwrap_or(bid);

    Some(SpotRate {
        id: format!("spot-{table_idx}-{row_idx}"),
        product: product_label(row),
        bid,
        ask,
        high: numbers[numbers.len() - 1],
        low: numbers[0],
        last_updated: now,
    })
}

/// Derive the market category from a lowercased row label.
pub fn derive_category(label: &str) -> MarketCategory {
    if label.contains("gold") {
        if label.contains("99.5") {
            MarketCategory::Gold995
        } else if label.contains("auction") {
            MarketCategory::GoldAuction
        } else {
            MarketCategory::GoldCurrent
        }
    } else if label.contains("silver") {
        if label.contains("999") {
            MarketCategory::Silver999
        } else {
            MarketCategory::SilverCurrent
        }
    } else {
        // Covers spot/INR labels too: the classifier keeps "spot" rows out
        // of the market extractor, and there is no spot bucket of its own.
        MarketCategory::Other
    }
}

fn capture_first(text: &str, pattern: &str) -> String {
    Regex::new(pattern)
        .ok()
        .and_then(|re| re.captures(text).map(|caps| caps[1].to_string()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::tables::RawCell;
    use std::collections::HashMap;

    fn make_row(texts: &[&str]) -> RawRow {
        let number_re = Regex::new(r"\d+(?:\.\d+)?").unwrap();
        let cells = texts
            .iter()
            .map(|t| RawCell {
                text: t.to_string(),
                html: t.to_string(),
                numbers: number_re
                    .find_iter(t)
                    .filter_map(|m| m.as_str().parse().ok())
                    .collect(),
                attributes: HashMap::new(),
            })
            .collect();
        RawRow {
            cells,
            index: 0,
            class_name: String::new(),
        }
    }

    fn now() -> chrono::DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_auction_field_ordering() {
        let row = make_row(&[
            "Gold 99.50 Auction GST 3 Extra Minimum 500",
            "6500",
            "100",
            "50",
        ]);
        let rate = extract_auction(&row, 0, 1, now()).unwrap();
        assert_eq!(rate.sell, 6500.0);
        assert_eq!(rate.m_rate, 100.0);
        assert_eq!(rate.premium, 50.0);
        assert_eq!(rate.gst, "3");
        assert_eq!(rate.extra_minimum, "500");
        assert_eq!(rate.id, "auction-0-1");
        assert_eq!(rate.product, "Gold 99.50 Auction GST 3 Extra Minimum 500");
    }

    #[test]
    fn test_auction_premium_takes_smallest_of_full_list() {
        // Four quote tokens: premium is the last of the sorted list, not the
        // third-largest.
        let row = make_row(&["Gold Auction GST", "6500", "100", "50", "25"]);
        let rate = extract_auction(&row, 0, 0, now()).unwrap();
        assert_eq!(rate.sell, 6500.0);
        assert_eq!(rate.m_rate, 100.0);
        assert_eq!(rate.premium, 25.0);
    }

    #[test]
    fn test_auction_needs_three_numbers() {
        let row = make_row(&["Gold Auction GST 3", "6500", "100"]);
        assert!(extract_auction(&row, 0, 0, now()).is_none());
    }

    #[test]
    fn test_auction_gst_defaults_empty() {
        let row = make_row(&["Gold Auction Extra Minimum 500", "6500", "100", "50"]);
        let rate = extract_auction(&row, 0, 0, now()).unwrap();
        assert_eq!(rate.gst, "");
        assert_eq!(rate.extra_minimum, "500");
    }

    #[test]
    fn test_market_four_number_mapping() {
        let row = make_row(&["Gold Current", "5950", "6000", "80", "5960"]);
        let rate = extract_market(&row, 2, 3, now()).unwrap();
        // Ascending: [80, 5950, 5960, 6000]
        assert_eq!(rate.low, Some(80.0));
        assert_eq!(rate.bid, Some(5950.0));
        assert_eq!(rate.ask, Some(5960.0));
        assert_eq!(rate.high, Some(6000.0));
        assert_eq!(rate.id, "market-2-3");
        assert_eq!(rate.source, RateSource::External);
    }

    #[test]
    fn test_market_two_numbers() {
        let row = make_row(&["Silver 999", "78.5", "80.0"]);
        let rate = extract_market(&row, 0, 0, now()).unwrap();
        assert_eq!(rate.bid, Some(78.5));
        assert_eq!(rate.ask, Some(80.0));
        assert_eq!(rate.high, Some(80.0));
        assert_eq!(rate.low, Some(78.5));
        assert_eq!(rate.category, MarketCategory::Silver999);
    }

    #[test]
    fn test_market_three_numbers() {
        let row = make_row(&["Gold Current", "5950", "5960", "5900"]);
        let rate = extract_market(&row, 0, 0, now()).unwrap();
        // Ascending: [5900, 5950, 5960]
        assert_eq!(rate.bid, Some(5900.0));
        assert_eq!(rate.ask, Some(5950.0));
        assert_eq!(rate.high, Some(5960.0));
        assert_eq!(rate.low, Some(5900.0));
    }

    #[test]
    fn test_market_single_number_collapses() {
        let row = make_row(&["Gold Current", "5950", "-"]);
        let rate = extract_market(&row, 0, 0, now()).unwrap();
        assert_eq!(rate.bid, Some(5950.0));
        assert_eq!(rate.ask, Some(5950.0));
        assert_eq!(rate.high, Some(5950.0));
        assert_eq!(rate.low, Some(5950.0));
    }

    #[test]
    fn test_market_zero_numbers_is_null() {
        let row = make_row(&["Gold Current", "-", "-"]);
        assert!(extract_market(&row, 0, 0, now()).is_none());
    }

    #[test]
    fn test_spot_extraction() {
        let row = make_row(&["Silver Spot", "78", "80"]);
        let rate = extract_spot(&row, 1, 4, now()).unwrap();
        assert_eq!(rate.bid, 78.0);
        assert_eq!(rate.ask, 80.0);
        assert_eq!(rate.high, 80.0);
        assert_eq!(rate.low, 78.0);
        assert_eq!(rate.id, "spot-1-4");
    }

    #[test]
    fn test_spot_needs_two_numbers() {
        let row = make_row(&["Gold Spot", "5950", "-"]);
        assert!(extract_spot(&row, 0, 0, now()).is_none());
    }

    #[test]
    fn test_label_digits_are_not_quote_values() {
        // "995" in the label is a purity code, not a bid.
        let row = make_row(&["Gold 995 Current", "5950", "5960"]);
        let rate = extract_market(&row, 0, 0, now()).unwrap();
        assert_eq!(rate.bid, Some(5950.0));
        assert_eq!(rate.ask, Some(5960.0));
    }

    #[test]
    fn test_derive_category() {
        assert_eq!(derive_category("gold 99.50 auction"), MarketCategory::Gold995);
        assert_eq!(derive_category("gold auction"), MarketCategory::GoldAuction);
        // "995" without the decimal point is not the 99.5 purity marker.
        assert_eq!(derive_category("gold 995 current"), MarketCategory::GoldCurrent);
        assert_eq!(derive_category("gold 916"), MarketCategory::GoldCurrent);
        assert_eq!(derive_category("silver 999"), MarketCategory::Silver999);
        assert_eq!(derive_category("silver bars"), MarketCategory::SilverCurrent);
        assert_eq!(derive_category("spot inr"), MarketCategory::Other);
        assert_eq!(derive_category("platinum"), MarketCategory::Other);
    }
}
