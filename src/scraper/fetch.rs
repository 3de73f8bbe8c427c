//! Fetch layer: ordered intermediary fallback for the source page.
//!
//! The source site has no API and sits behind aggressive CORS/geo rules, so
//! the page is requested directly first and then through public read-through
//! proxies. The first success wins; there are no retries beyond the list and
//! no backoff — total failure here is an expected condition handled upstream.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use super::{allorigins_url, corsproxy_url, direct_url};

/// Ordered intermediary list. Tried strictly in sequence.
const INTERMEDIARIES: [(&str, fn(&str) -> String); 3] = [
    ("direct", direct_url),
    ("allorigins", allorigins_url),
    ("corsproxy", corsproxy_url),
];

/// A fetched page plus which intermediary produced it (diagnostic only).
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub html: String,
    pub via: String,
}

/// Fetch-layer errors.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Every intermediary failed with a network error or non-success status.
    #[error("all intermediaries failed for {url}: {summary}")]
    Exhausted { url: String, summary: String },

    /// The HTTP client itself could not be constructed.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Source of raw HTML for a target URL.
///
/// `HttpSource` is the network-backed implementation; tests substitute a
/// scripted source so the pipeline runs without I/O.
pub trait PageSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<FetchedPage, FetchError>> + Send;
}

/// Network-backed page source with a request timeout.
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Build a source with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let mut failures: Vec<String> = Vec::new();

        for (name, build) in INTERMEDIARIES {
            let attempt_url = build(url);
            debug!("fetching via {}: {}", name, attempt_url);

            match self.client.get(&attempt_url).send().await {
                Ok(resp) if resp.status().is_success() => match resp.text().await {
                    Ok(html) => {
                        debug!("fetch succeeded via {}", name);
                        return Ok(FetchedPage {
                            html,
                            via: name.to_string(),
                        });
                    }
                    Err(e) => {
                        warn!("{} returned an unreadable body: {}", name, e);
                        failures.push(format!("{name}: body error ({e})"));
                    }
                },
                Ok(resp) => {
                    warn!("{} answered with status {}", name, resp.status());
                    failures.push(format!("{name}: status {}", resp.status()));
                }
                Err(e) => {
                    warn!("{} request failed: {}", name, e);
                    failures.push(format!("{name}: {e}"));
                }
            }
        }

        Err(FetchError::Exhausted {
            url: url.to_string(),
            summary: failures.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediary_order() {
        let names: Vec<&str> = INTERMEDIARIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["direct", "allorigins", "corsproxy"]);
    }

    #[test]
    fn test_exhausted_message_names_every_attempt() {
        let err = FetchError::Exhausted {
            url: "https://example.com/live".to_string(),
            summary: "direct: status 500; allorigins: status 500; corsproxy: status 500"
                .to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/live"));
        assert!(msg.contains("direct"));
        assert!(msg.contains("corsproxy"));
    }
}
