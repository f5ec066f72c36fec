//! Feed provider trait and the HTTP implementation.
//!
//! The FeedProvider trait abstracts over the remote holiday source so the
//! cache layer can be exercised against mocks. The HTTP implementation does
//! one single-shot GET per call — no retries, no persistence; retry-by-next-
//! query is the strategy, and writing the artifact is the cache's job.

use crate::calendar::HolidayDataset;
use std::time::Duration;
use thiserror::Error;

/// Default feed: one JSON file per year, published via CDN.
pub const DEFAULT_FEED_URL: &str =
    "https://cdn.jsdelivr.net/gh/NateScarlet/holiday-cn@master/{year}.json";

/// Deadline for a single feed request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Error fetching the remote feed.
///
/// Timeouts are reported as `Network` — callers apply one uniform failure
/// path regardless of how the fetch died.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("feed request failed: HTTP {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed feed payload: {0}")]
    MalformedPayload(String),
}

/// Trait for holiday feed sources.
///
/// Implementations fetch the full dataset for one calendar year. The cache
/// layer sits above this trait — providers don't know about the store.
pub trait FeedProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the complete holiday dataset for a year.
    fn fetch(&self, year: i32) -> Result<HolidayDataset, FetchError>;
}

/// HTTP feed provider with a fixed request deadline.
pub struct HttpFeedProvider {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl HttpFeedProvider {
    /// Build a provider for a URL template containing a `{year}` placeholder.
    pub fn new(url_template: impl Into<String>) -> Self {
        Self::with_timeout(url_template, FETCH_TIMEOUT)
    }

    /// Build a provider with an explicit request deadline.
    pub fn with_timeout(url_template: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            url_template: url_template.into(),
        }
    }

    /// Resolve the URL for a specific year.
    fn feed_url(&self, year: i32) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }
}

impl Default for HttpFeedProvider {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

impl FeedProvider for HttpFeedProvider {
    fn name(&self) -> &str {
        "http_feed"
    }

    fn fetch(&self, year: i32) -> Result<HolidayDataset, FetchError> {
        let url = self.feed_url(year);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let dataset: HolidayDataset = resp
            .json()
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))?;

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_template_substitutes_year() {
        let provider = HttpFeedProvider::new("https://example.com/{year}.json");
        assert_eq!(provider.feed_url(2024), "https://example.com/2024.json");
        assert_eq!(provider.feed_url(2025), "https://example.com/2025.json");
    }

    #[test]
    fn default_template_points_at_year_file() {
        let provider = HttpFeedProvider::default();
        let url = provider.feed_url(2024);
        assert!(url.ends_with("2024.json"));
        assert!(!url.contains("{year}"));
    }

    #[test]
    fn missing_days_field_is_malformed() {
        // The payload parse path is serde-driven; a body without `days`
        // must not deserialize into a dataset.
        let result = serde_json::from_str::<HolidayDataset>(r#"{"year":2024}"#);
        assert!(result.is_err());
    }
}
