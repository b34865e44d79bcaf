//! TfL Unified API HTTP client.
//!
//! Provides async methods for the three endpoints the monitor consumes.
//! Responses are read as text and parsed separately so that a parse
//! failure can carry a sample of the offending body.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use super::error::TflError;
use super::types::{JourneyPlannerResult, LineDto, PredictionDto};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk";

/// Characters kept verbatim in free-text path segments. Everything else
/// (spaces, commas, slashes) must be escaped or the address would be
/// misread as URL structure.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Configuration for the TfL client.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Application key sent as the `app_key` query parameter. Anonymous
    /// access works but is rate-limited more aggressively.
    pub app_key: Option<String>,
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a new config with default settings and no application key.
    pub fn new() -> Self {
        Self {
            app_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set the application key.
    pub fn with_app_key(mut self, key: impl Into<String>) -> Self {
        self.app_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// TfL Unified API client.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
    app_key: Option<String>,
}

impl TflClient {
    /// Create a new TfL client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            app_key: config.app_key,
        })
    }

    /// Plan a journey between two free-text addresses.
    ///
    /// Uses fixed preferences: least time, tube and walking only, fast
    /// walking speed. The response lists candidate journeys with the
    /// fastest first.
    pub async fn plan_journey(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<JourneyPlannerResult, TflError> {
        let url = format!(
            "{}/Journey/JourneyResults/{}/to/{}",
            self.base_url,
            encode_segment(origin),
            encode_segment(destination),
        );

        let request = self.http.get(&url).query(&[
            ("nationalSearch", "false"),
            ("journeyPreference", "LeastTime"),
            ("mode", "tube,walking"),
            ("walkingSpeed", "Fast"),
        ]);

        self.fetch_json(request).await
    }

    /// Get live arrival predictions for a stop point.
    pub async fn arrivals(&self, station_id: &str) -> Result<Vec<PredictionDto>, TflError> {
        let url = format!(
            "{}/StopPoint/{}/Arrivals",
            self.base_url,
            encode_segment(station_id)
        );

        self.fetch_json(self.http.get(&url)).await
    }

    /// Get the current status for a line.
    ///
    /// The response is a list even for a single line id.
    pub async fn line_status(&self, line_id: &str) -> Result<Vec<LineDto>, TflError> {
        let url = format!("{}/Line/{}/Status", self.base_url, encode_segment(line_id));

        self.fetch_json(self.http.get(&url)).await
    }

    /// Send a request and parse the JSON response, mapping non-2xx
    /// statuses and parse failures to typed errors.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> Result<T, TflError> {
        if let Some(key) = &self.app_key {
            request = request.query(&[("app_key", key.as_str())]);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TflError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            let sample: String = body.chars().take(500).collect();
            TflError::Json(format!("{e} (body: {sample})"))
        })
    }
}

/// Percent-encode a free-text URL path segment.
fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, PATH_SEGMENT).to_string()
}
