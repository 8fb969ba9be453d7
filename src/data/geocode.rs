//! City name lookup via the Open-Meteo geocoding API
//!
//! Free, no API key required. A lookup always takes the first match; the
//! multi-result search backs the search bar's suggestion list.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::CurrentCityInfo;
use crate::cache::CacheManager;

/// Base URL for the Open-Meteo geocoding API
const GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Number of suggestions requested for the search bar
pub const SUGGESTION_COUNT: u8 = 5;

/// Geocoding results rarely change; keep them for 30 days
const CACHE_TTL_HOURS: u64 = 24 * 30;

/// Errors that can occur when resolving a city name
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Geocoding API returned status {0}")]
    Status(u16),

    /// Failed to parse JSON response
    #[error("Failed to parse geocoding response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Empty or whitespace-only query
    #[error("City name is empty")]
    EmptyQuery,

    /// No city matched the query
    #[error("No city found matching '{0}'")]
    NotFound(String),
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    /// Absent when nothing matched
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
    timezone: Option<String>,
}

impl From<GeocodingResult> for CurrentCityInfo {
    fn from(result: GeocodingResult) -> Self {
        Self {
            name: result.name,
            country: result.country,
            admin1: result.admin1,
            latitude: result.latitude,
            longitude: result.longitude,
            timezone: result.timezone,
        }
    }
}

/// Client for resolving city names to coordinates
#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    cache: Option<CacheManager>,
    base_url: String,
}

impl Default for GeocodingClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodingClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            cache: None,
            base_url: GEOCODING_BASE_URL.to_string(),
        }
    }

    /// Use the given cache for first-match lookups
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Point the client at another base URL (mock servers in tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn cache_key(query: &str) -> String {
        let normalized: String = query
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        format!("geocode_{}", normalized)
    }

    /// Resolve a city name to its first match
    pub async fn lookup(&self, query: &str) -> Result<CurrentCityInfo, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let key = Self::cache_key(query);
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<CurrentCityInfo>(&key) {
                if !cached.is_expired {
                    tracing::debug!("Geocode cache hit for '{}'", query);
                    return Ok(cached.data);
                }
            }
        }

        let city = self
            .search(query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;

        if let Some(ref cache) = self.cache {
            if let Err(e) = cache.write(&key, &city, CACHE_TTL_HOURS) {
                tracing::warn!("Failed to cache geocode result for '{}': {}", query, e);
            }
        }

        tracing::info!(
            "Resolved '{}' to {} ({:.4}, {:.4})",
            query,
            city.display_name(),
            city.latitude,
            city.longitude
        );
        Ok(city)
    }

    /// Search for up to `count` cities matching `query`, best match first
    ///
    /// An unmatched query yields an empty list rather than an error.
    pub async fn search(&self, query: &str, count: u8) -> Result<Vec<CurrentCityInfo>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("name", query.to_string()),
                ("count", count.to_string()),
                ("language", "en".to_string()),
                ("format", "json".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let body: GeocodingResponse = serde_json::from_str(&text)?;

        if body.results.is_empty() {
            tracing::warn!("No geocoding results for '{}'", query);
        }

        Ok(body.results.into_iter().map(CurrentCityInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const BERLIN_RESPONSE: &str = r#"{
        "results": [
            {
                "id": 2950159,
                "name": "Berlin",
                "latitude": 52.52437,
                "longitude": 13.41053,
                "elevation": 74.0,
                "feature_code": "PPLC",
                "country_code": "DE",
                "timezone": "Europe/Berlin",
                "population": 3426354,
                "country": "Germany",
                "admin1": "Land Berlin"
            },
            {
                "id": 5083330,
                "name": "Berlin",
                "latitude": 44.46867,
                "longitude": -71.18508,
                "timezone": "America/New_York",
                "country": "United States",
                "admin1": "New Hampshire"
            }
        ],
        "generationtime_ms": 0.9
    }"#;

    async fn mock_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_lookup_takes_first_match() {
        let server = mock_server(BERLIN_RESPONSE).await;
        let client = GeocodingClient::new().with_base_url(server.uri());

        let city = client.lookup("Berlin").await.expect("lookup should succeed");

        assert_eq!(city.name, "Berlin");
        assert_eq!(city.country.as_deref(), Some("Germany"));
        assert_eq!(city.timezone.as_deref(), Some("Europe/Berlin"));
        assert!((city.latitude - 52.52437).abs() < 0.0001);
    }

    #[tokio::test]
    async fn test_search_returns_all_results() {
        let server = mock_server(BERLIN_RESPONSE).await;
        let client = GeocodingClient::new().with_base_url(server.uri());

        let cities = client.search("Berlin", SUGGESTION_COUNT).await.expect("search");

        assert_eq!(cities.len(), 2);
        assert_eq!(cities[1].suggestion_label(), "Berlin, New Hampshire, United States");
    }

    #[tokio::test]
    async fn test_search_sends_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("name", "New York"))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"results": []}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeocodingClient::new().with_base_url(server.uri());
        let cities = client.search("  New York ", 5).await.expect("search");
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_no_results_is_not_found() {
        // The API omits "results" entirely when nothing matches
        let server = mock_server(r#"{"generationtime_ms": 0.5}"#).await;
        let client = GeocodingClient::new().with_base_url(server.uri());

        let result = client.lookup("Xyzzyville").await;

        match result {
            Err(GeocodeError::NotFound(query)) => assert_eq!(query, "Xyzzyville"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_lookup_empty_query_makes_no_request() {
        let client = GeocodingClient::new().with_base_url("http://127.0.0.1:9");
        assert!(matches!(client.lookup("   ").await, Err(GeocodeError::EmptyQuery)));
        assert!(matches!(client.search("", 5).await, Err(GeocodeError::EmptyQuery)));
    }

    #[tokio::test]
    async fn test_lookup_malformed_body() {
        let server = mock_server("not json").await;
        let client = GeocodingClient::new().with_base_url(server.uri());

        assert!(matches!(client.lookup("Berlin").await, Err(GeocodeError::ParseError(_))));
    }

    #[tokio::test]
    async fn test_lookup_is_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(BERLIN_RESPONSE))
            .expect(1)
            .mount(&server)
            .await;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        let client = GeocodingClient::new()
            .with_cache(cache)
            .with_base_url(server.uri());

        let first = client.lookup("Berlin").await.expect("first lookup");
        let second = client.lookup("  berlin ").await.expect("second lookup");

        assert_eq!(first, second);
    }

    #[test]
    fn test_cache_key_normalizes_query() {
        assert_eq!(GeocodingClient::cache_key(" New York "), "geocode_new_york");
        assert_eq!(GeocodingClient::cache_key("São Paulo"), "geocode_são_paulo");
    }
}
