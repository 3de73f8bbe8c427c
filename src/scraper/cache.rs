//! Single-slot cache for the last successful scrape.
//!
//! Holds at most one `ScrapeResult` with the time it was stored. The slot is
//! per-process state and is lost on restart, which is fine: the next call
//! simply fetches again. The clock is injected so tests can move time
//! without real delays.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::ScrapeResult;

/// Time source for freshness checks.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Cached result with its storage timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: ScrapeResult,
    pub cached_at: DateTime<Utc>,
}

/// Single-slot TTL cache.
pub struct RateCache {
    slot: Mutex<Option<CacheEntry>>,
    ttl: Duration,
    clock: Clock,
}

impl RateCache {
    /// Create a cache with the given freshness window, on the real clock.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(Utc::now))
    }

    /// Create a cache with an injected clock.
    pub fn with_clock(ttl: Duration, clock: Clock) -> Self {
        Self {
            slot: Mutex::new(None),
            ttl,
            clock,
        }
    }

    /// Get the cached result if still fresh.
    ///
    /// An expired entry is dropped on the way out, so a later `set` always
    /// replaces rather than resurrects it.
    pub fn get(&self) -> Option<ScrapeResult> {
        let mut slot = self.slot.lock().ok()?;
        let entry = slot.as_ref()?;

        let elapsed = (self.clock)() - entry.cached_at;
        if elapsed >= self.ttl {
            debug!("cache entry expired after {:?}", elapsed);
            *slot = None;
            return None;
        }

        Some(entry.data.clone())
    }

    /// Store a result, replacing whatever was in the slot.
    pub fn set(&self, data: ScrapeResult) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(CacheEntry {
                data,
                cached_at: (self.clock)(),
            });
        }
    }

    /// Empty the slot.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
