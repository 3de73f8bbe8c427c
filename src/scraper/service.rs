//! Public surface of the rate engine.
//!
//! Exposes exactly two behaviors to collaborators: a live fetch that always
//! goes to the network, and a cached read that prefers a fresh slot. Nothing
//! else of the pipeline is public API.

use tracing::debug;

use super::cache::RateCache;
use super::fetch::PageSource;
use super::pipeline::scrape_rates;
use crate::types::ScrapeResult;

/// Rate service wrapping the scrape pipeline with the cache slot.
pub struct RateService<S: PageSource> {
    source: S,
    cache: RateCache,
    url: String,
    /// Collapses concurrent cache-miss callers onto one in-flight refresh.
    refresh_lock: tokio::sync::Mutex<()>,
}

impl<S: PageSource> RateService<S> {
    pub fn new(source: S, cache: RateCache, url: impl Into<String>) -> Self {
        Self {
            source,
            cache,
            url: url.into(),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Always attempt the network, updating the cache on success.
    pub async fn fetch_live_rates(&self) -> ScrapeResult {
        let _guard = self.refresh_lock.lock().await;
        self.refresh().await
    }

    /// Bypass the freshness check unconditionally. Same contract as
    /// [`fetch_live_rates`](Self::fetch_live_rates).
    pub async fn force_refresh(&self) -> ScrapeResult {
        self.fetch_live_rates().await
    }

    /// Serve the cached result while fresh, otherwise refresh.
    ///
    /// Callers that miss simultaneously queue on the refresh lock and
    /// re-check the slot once they hold it, so a burst of misses costs a
    /// single network fetch.
    pub async fn get_rates_with_cache(&self) -> ScrapeResult {
        if let Some(hit) = self.cache.get() {
            debug!("serving cached rates");
            return hit;
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(hit) = self.cache.get() {
            debug!("cache filled while waiting for refresh lock");
            return hit;
        }
        self.refresh().await
    }

    /// Run the pipeline once. A failed scrape is returned but never cached,
    /// so callers retry sooner than the freshness window after an error.
    async fn refresh(&self) -> ScrapeResult {
        let result = scrape_rates(&self.source, &self.url).await;
        if result.is_success() {
            self.cache.set(result.clone());
        }
        result
    }
}
