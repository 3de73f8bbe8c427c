//! Rate scraper for the bullion trading site.
//!
//! Fetches the live-rates page through a fallback list of intermediaries,
//! transcribes its tables into a generic model, and recovers auction, market
//! and spot quotes from unlabeled cells by heuristic classification.

pub mod cache;
pub mod classify;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod service;
pub mod tables;

pub use cache::RateCache;
pub use fetch::{FetchError, HttpSource, PageSource};
pub use service::RateService;

/// Live-rates page of the source site.
pub const SOURCE_URL: &str = "https://www.bullionratesindia.com/live";

/// Build the direct-request URL (no intermediary).
pub fn direct_url(url: &str) -> String {
    url.to_string()
}

/// Build an allorigins read-through URL for a target page.
pub fn allorigins_url(url: &str) -> String {
    format!(
        "https://api.allorigins.win/raw?url={}",
        urlencoding::encode(url)
    )
}

/// Build a corsproxy read-through URL for a target page.
pub fn corsproxy_url(url: &str) -> String {
    format!("https://corsproxy.io/?{}", urlencoding::encode(url))
}
