//! Configuration for the bullion-rates scraper.

use serde::{Deserialize, Serialize};

use crate::scraper::SOURCE_URL;

/// Scraper configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Live-rates page to scrape. Fixed per deployment, never per call.
    #[serde(default = "default_source_url")]
    pub source_url: String,
    /// Per-request timeout for each intermediary attempt.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Freshness window for the cached result.
    #[serde(default = "default_cache_freshness_secs")]
    pub cache_freshness_secs: i64,
}

fn default_source_url() -> String {
    SOURCE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_cache_freshness_secs() -> i64 {
    300
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            source_url: default_source_url(),
            request_timeout_secs: default_request_timeout_secs(),
            cache_freshness_secs: default_cache_freshness_secs(),
        }
    }
}

impl ScraperConfig {
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cache_freshness(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.cache_freshness_secs)
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl AppConfig {
    /// Load configuration from defaults, config file and environment
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (BULLION_SCRAPER__SOURCE_URL, etc.)
            .add_source(
                config::Environment::with_prefix("BULLION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
