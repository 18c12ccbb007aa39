//! GBFS HTTP client.

use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::FeedError;
use super::types::{StationInfoFeed, StationStatusFeed};

/// Citi Bike NYC real-time station status.
pub const DEFAULT_STATUS_URL: &str = "https://gbfs.citibikenyc.com/gbfs/en/station_status.json";

/// Citi Bike NYC static station information.
pub const DEFAULT_INFORMATION_URL: &str =
    "https://gbfs.citibikenyc.com/gbfs/en/station_information.json";

/// Configuration for the feed client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    /// URL of `station_status.json`
    pub status_url: String,
    /// URL of `station_information.json`
    pub information_url: String,
    /// Request timeout in seconds. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,
}

impl FeedConfig {
    /// Create a config pointing at the Citi Bike NYC feeds.
    pub fn new() -> Self {
        Self {
            status_url: DEFAULT_STATUS_URL.to_string(),
            information_url: DEFAULT_INFORMATION_URL.to_string(),
            timeout_secs: None,
        }
    }

    /// Point both feeds at `{base}/station_status.json` and
    /// `{base}/station_information.json` (for other GBFS systems and testing).
    pub fn with_base_url(mut self, base: impl AsRef<str>) -> Self {
        let base = base.as_ref().trim_end_matches('/');
        self.status_url = format!("{base}/station_status.json");
        self.information_url = format!("{base}/station_information.json");
        self
    }

    pub fn with_status_url(mut self, url: impl Into<String>) -> Self {
        self.status_url = url.into();
        self
    }

    pub fn with_information_url(mut self, url: impl Into<String>) -> Self {
        self.information_url = url.into();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Both feeds, fetched together for one request.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    pub status: StationStatusFeed,
    pub information: StationInfoFeed,
}

/// Client for a pair of GBFS station feeds.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    status_url: String,
    information_url: String,
}

impl FeedClient {
    /// Create a new feed client with the given configuration.
    pub fn new(config: FeedConfig) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            status_url: config.status_url,
            information_url: config.information_url,
        })
    }

    pub fn status_url(&self) -> &str {
        &self.status_url
    }

    pub fn information_url(&self) -> &str {
        &self.information_url
    }

    /// GET a URL and parse the body as JSON.
    ///
    /// Makes exactly one attempt. A non-success status is reported as
    /// [`FeedError::Status`] carrying the URL and status code.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!(url, status = status.as_u16(), "feed request failed");
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| FeedError::Json {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch `station_status.json`.
    pub async fn fetch_status(&self) -> Result<StationStatusFeed, FeedError> {
        let feed: StationStatusFeed = self.fetch_json(&self.status_url).await?;
        debug!(
            stations = feed.station_count(),
            last_updated = ?feed.last_updated_at(),
            "fetched station status"
        );
        Ok(feed)
    }

    /// Fetch `station_information.json`.
    pub async fn fetch_information(&self) -> Result<StationInfoFeed, FeedError> {
        let feed: StationInfoFeed = self.fetch_json(&self.information_url).await?;
        debug!(
            stations = feed.station_count(),
            last_updated = ?feed.last_updated_at(),
            "fetched station information"
        );
        Ok(feed)
    }

    /// Fetch both feeds concurrently.
    ///
    /// Fails as soon as either fetch fails; no partial snapshot is returned.
    pub async fn fetch_snapshot(&self) -> Result<FeedSnapshot, FeedError> {
        let (status, information) =
            futures::try_join!(self.fetch_status(), self.fetch_information())?;
        Ok(FeedSnapshot {
            status,
            information,
        })
    }
}
