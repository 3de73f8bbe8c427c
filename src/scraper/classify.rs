//! Row classifier: decides what kind of rate a table row carries.
//!
//! The source page never labels its cells, so classification leans on the
//! first cell's text plus the presence of numeric tokens. Rules run in a
//! fixed order — auction, market, spot — because auction rows also contain
//! "gold" and must win before the generic market check sees them.

use regex::Regex;

use super::tables::RawRow;

/// Coarse classification of a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    Auction,
    Market,
    Spot,
}

/// Keywords whose co-occurrence marks a verbose auction-rate label.
/// Requiring two of them alongside "gold" separates auction rows from
/// ordinary gold-price rows that mention GST incidentally.
const AUCTION_KEYWORDS: [&str; 5] = ["auction", "99.50", "gst", "extra", "minimum"];

/// Classify a row, or `None` for unrelated noise.
///
/// Rows with fewer than 3 cells are rejected before any keyword check —
/// too little structure to be a rate row. Classification is a pure function
/// of the row contents; the same row always gets the same answer.
pub fn classify_row(row: &RawRow) -> Option<RateKind> {
    if row.cells.len() < 3 {
        return None;
    }

    let first = row.first_cell_text();
    let has_number = row.has_number();

    if is_auction_row(&first, has_number) {
        Some(RateKind::Auction)
    } else if is_market_row(&first, has_number) {
        Some(RateKind::Market)
    } else if is_spot_row(&first, has_number) {
        Some(RateKind::Spot)
    } else {
        None
    }
}

/// Auction: "gold" plus at least two auction keywords plus a numeric token.
pub fn is_auction_row(first: &str, has_number: bool) -> bool {
    if !has_number || !first.contains("gold") {
        return false;
    }
    let keyword_hits = AUCTION_KEYWORDS
        .iter()
        .filter(|k| first.contains(**k))
        .count();
    keyword_hits >= 2
}

/// Market: gold/silver label without "auction"/"spot", a numeric token, and
/// one of the inconsistent label markers (the word "current", a purity code,
/// or any two-or-more-digit run).
pub fn is_market_row(first: &str, has_number: bool) -> bool {
    if !has_number {
        return false;
    }
    if !first.contains("gold") && !first.contains("silver") {
        return false;
    }
    if first.contains("auction") || first.contains("spot") {
        return false;
    }
    first.contains("current")
        || first.contains("999")
        || first.contains("925")
        || Regex::new(r"\d{2,}").unwrap().is_match(first)
}

/// Spot: explicitly labeled "spot" with a numeric token somewhere in the row.
pub fn is_spot_row(first: &str, has_number: bool) -> bool {
    has_number && first.contains("spot")
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

    #[test]
    fn test_auction_row() {
        let row = make_row(&[
            "Gold 99.50 Auction GST 3 Extra Minimum 500",
            "6500",
            "100",
            "50",
        ]);
        assert_eq!(classify_row(&row), Some(RateKind::Auction));
    }

    #[test]
    fn test_auction_wins_over_market_without_auction_word() {
        // Two keywords ("99.50", "gst") make this an auction label even
        // though the market rule would also accept it; auction is checked
        // first.
        let row = make_row(&["Gold 99.50 GST 3", "6500", "100", "50"]);
        assert_eq!(classify_row(&row), Some(RateKind::Auction));
    }

    #[test]
    fn test_auction_needs_two_keywords() {
        // "gst" alone is an incidental mention, not an auction label.
        let row = make_row(&["Gold with GST", "6500", "6510"]);
        assert_eq!(classify_row(&row), Some(RateKind::Market));
    }

    #[test]
    fn test_market_row_by_purity_code() {
        let row = make_row(&["Silver 999", "78.5", "80.0"]);
        assert_eq!(classify_row(&row), Some(RateKind::Market));
    }

    #[test]
    fn test_market_row_by_current_label() {
        let row = make_row(&["Gold Current", "5950", "5960"]);
        assert_eq!(classify_row(&row), Some(RateKind::Market));
    }

    #[test]
    fn test_market_excludes_spot_label() {
        let row = make_row(&["Gold Spot", "5950", "5960"]);
        assert_eq!(classify_row(&row), Some(RateKind::Spot));
    }

    #[test]
    fn test_spot_row() {
        let row = make_row(&["Silver Spot", "78", "80"]);
        assert_eq!(classify_row(&row), Some(RateKind::Spot));
    }

    #[test]
    fn test_noise_row() {
        let row = make_row(&["Contact us", "Mon-Sat", "10am"]);
        assert_eq!(classify_row(&row), None);
    }

    #[test]
    fn test_no_number_means_no_rate() {
        let row = make_row(&["Gold Current", "call", "for price"]);
        assert_eq!(classify_row(&row), None);
    }

    #[test]
    fn test_short_row_rejected_before_keywords() {
        let row = make_row(&["Gold Current", "5950"]);
        assert_eq!(classify_row(&row), None);
    }

    #[test]
    fn test_classification_is_stable() {
        let row = make_row(&["Gold 995 Current", "5950", "5960"]);
        assert_eq!(classify_row(&row), classify_row(&row));
    }

    #[test]
    fn test_mutual_exclusivity_order() {
        // An auction-labeled row matches the auction rule before the market
        // rule can consider it; each probe row lands in exactly one bucket.
        let probes = [
            make_row(&["Gold 99.50 Auction GST 3", "6500", "100", "50"]),
            make_row(&["Gold 995 Current", "5950", "5960"]),
            make_row(&["Gold Spot", "5950", "5960"]),
            make_row(&["Silver Spot INR", "78", "80"]),
        ];
        for row in &probes {
            let kind = classify_row(row);
            assert!(kind.is_some());
            let matches = [
                kind == Some(RateKind::Auction),
                kind == Some(RateKind::Market),
                kind == Some(RateKind::Spot),
            ];
            assert_eq!(matches.iter().filter(|m| **m).count(), 1);
        }
    }
}
