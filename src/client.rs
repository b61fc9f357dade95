use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::resolve_api_key;
use crate::error::{status_error, Error, Result};
use crate::forecast::{project_day, ForecastDay, TimestampMode};

/// Production One Call endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/onecall";

const DEFAULT_NUM_DAYS: u32 = 7;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking OpenWeatherMap client.
///
/// Construction resolves the API key once; afterwards the client is a plain
/// value that can be cloned and reused across requests.
#[derive(Debug, Clone)]
pub struct Client {
    key: String,
    base_url: String,
    num_days: u32,
    timestamps: TimestampMode,
    verify: bool,

    http: HttpClient,
}

impl Client {
    /// Creates a client from the ambient configuration.
    ///
    /// This is equivalent to `Client::new(None, None)`.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None)
    }

    /// Creates a client using (in order of precedence):
    /// - an explicit `key` argument
    /// - the `OPENWEATHERMAP_API_KEY` environment variable
    /// - an `.api.txt` file in the working directory
    ///
    /// `verify` controls TLS certificate verification and defaults to on.
    /// The provider's HTTPS endpoint has historically failed certificate
    /// validation in some environments; `Some(false)` accepts invalid
    /// certificates for exactly that case, and [`Client::with_base_url`]
    /// can switch to the plain-HTTP endpoint instead.
    pub fn new(key: Option<String>, verify: Option<bool>) -> Result<Self> {
        let key = resolve_api_key(key)?;
        let verify = verify.unwrap_or(true);
        let http = build_http(DEFAULT_TIMEOUT, verify)?;

        Ok(Self {
            key,
            base_url: DEFAULT_BASE_URL.to_string(),
            num_days: DEFAULT_NUM_DAYS,
            timestamps: TimestampMode::default(),
            verify,
            http,
        })
    }

    /// Replaces the per-request timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = build_http(timeout, self.verify)?;
        Ok(self)
    }

    /// Replaces the number of days asked of the provider (default 7).
    ///
    /// The count is advisory: free-tier accounts get at most the current
    /// day plus seven future days regardless of what is requested.
    pub fn with_num_days(mut self, num_days: u32) -> Self {
        self.num_days = num_days;
        self
    }

    /// Replaces the timestamp rendering mode (default UTC).
    pub fn with_timestamp_mode(mut self, timestamps: TimestampMode) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Replaces the One Call endpoint, e.g. to point at a test server, or
    /// at `http://api.openweathermap.org/data/2.5/onecall` when the
    /// provider's HTTPS certificate cannot be validated.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetches the daily forecast for a coordinate, one [`ForecastDay`] per
    /// `daily` entry, in provider order.
    ///
    /// `lat` is a latitude in [-90, 90] and `lon` a longitude in
    /// (-180, 180]; ranges are enforced by the provider, not here.
    pub fn daily_forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastDay>> {
        debug!(
            lat,
            lon,
            num_days = self.num_days,
            url = %self.base_url,
            "requesting daily forecast"
        );

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("cnt", self.num_days.to_string()),
                ("appid", self.key.clone()),
            ])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(status_error(status, &body));
        }
        trace!(%status, body = %body, "provider response");

        let payload: Value = serde_json::from_str(&body).map_err(Error::Decode)?;
        let daily = payload
            .get("daily")
            .and_then(Value::as_array)
            .ok_or(Error::MissingDaily)?;

        daily
            .iter()
            .map(|day| project_day(day, self.timestamps))
            .collect()
    }
}

fn build_http(timeout: Duration, verify: bool) -> Result<HttpClient> {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&format!("openweathermap-rs/{}", env!("CARGO_PKG_VERSION")))
            .unwrap_or(HeaderValue::from_static("openweathermap-rs")),
    );

    let mut builder = HttpClient::builder()
        .default_headers(default_headers)
        .timeout(timeout);

    if !verify {
        builder = builder.danger_accept_invalid_certs(true);
    }

    Ok(builder.build()?)
}
