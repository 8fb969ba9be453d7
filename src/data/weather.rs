//! Open-Meteo forecast API client
//!
//! Fetches current, hourly and daily forecast data for a coordinate pair and
//! returns it as a [`RawForecast`] in canonical units. Responses are cached
//! on disk and an expired entry is served when the API cannot be reached.

use reqwest::Client;
use thiserror::Error;

use super::RawForecast;
use crate::cache::CacheManager;
use crate::forecast::ForecastError;

/// Base URL for the Open-Meteo forecast API
const OPEN_METEO_BASE_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Fields requested for the `current` block
const CURRENT_FIELDS: &str =
    "temperature_2m,apparent_temperature,relative_humidity_2m,precipitation,weather_code,wind_speed_10m";

/// Fields requested for the `hourly` block
const HOURLY_FIELDS: &str = "temperature_2m,precipitation,weather_code";

/// Fields requested for the `daily` block
const DAILY_FIELDS: &str =
    "weather_code,temperature_2m_max,temperature_2m_min,precipitation_sum";

/// Days of forecast requested
const FORECAST_DAYS: u8 = 7;

/// Time-to-live for forecast cache entries in hours
const CACHE_TTL_HOURS: u64 = 1;

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Forecast API returned status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The payload parsed but its series are inconsistent
    #[error("Invalid forecast payload: {0}")]
    InvalidPayload(#[from] ForecastError),
}

/// Client for fetching forecasts from the Open-Meteo API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    cache: Option<CacheManager>,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient without a cache
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: None,
            base_url: OPEN_METEO_BASE_URL.to_string(),
        }
    }

    /// Use the given cache for forecast responses
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Point the client at another base URL (mock servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Cache key for a coordinate pair, rounded to roughly 1 km
    fn cache_key(lat: f64, lon: f64) -> String {
        format!("forecast_{:.2}_{:.2}", lat, lon)
    }

    /// Fetch the forecast for the given coordinates
    ///
    /// # Behavior
    /// - Returns a fresh cache entry without a request
    /// - Otherwise fetches from the API and caches the result
    /// - On API failure, returns an expired cache entry if one exists
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<RawForecast, WeatherError> {
        let key = Self::cache_key(lat, lon);

        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<RawForecast>(&key) {
                if !cached.is_expired {
                    tracing::debug!("Forecast cache hit for {}", key);
                    return Ok(cached.data);
                }
            }
        }

        match self.fetch_from_api(lat, lon).await {
            Ok(forecast) => {
                if let Some(ref cache) = self.cache {
                    if let Err(e) = cache.write(&key, &forecast, CACHE_TTL_HOURS) {
                        tracing::warn!("Failed to cache forecast {}: {}", key, e);
                    }
                }
                Ok(forecast)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<RawForecast>(&key) {
                        tracing::warn!("Forecast fetch failed ({}), using stale cache", e);
                        return Ok(cached.data);
                    }
                }
                Err(e)
            }
        }
    }

    async fn fetch_from_api(&self, lat: f64, lon: f64) -> Result<RawForecast, WeatherError> {
        tracing::info!("Fetching forecast for {:.4}, {:.4}", lat, lon);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("current", CURRENT_FIELDS.to_string()),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("forecast_days", FORECAST_DAYS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        parse_forecast(&text)
    }
}

/// Parse an Open-Meteo forecast body and check its series are aligned
pub fn parse_forecast(body: &str) -> Result<RawForecast, WeatherError> {
    let forecast: RawForecast = serde_json::from_str(body)?;
    forecast.validate()?;

    tracing::debug!(
        hours = forecast.hourly.time.len(),
        days = forecast.daily.time.len(),
        "Parsed forecast"
    );
    Ok(forecast)
}
