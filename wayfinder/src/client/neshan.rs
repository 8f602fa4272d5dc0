//! Neshan HTTP client.
//!
//! Implements place search (`/v1/search`) and driving directions
//! (`/v4/direction`) against the Neshan API.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::{Coordinate, SearchResult};

use super::error::ClientError;
use super::types::{DirectionResponse, SearchResponse};
use super::{PlaceSearchClient, RouteClient};

/// Default base URL for the Neshan API.
const DEFAULT_BASE_URL: &str = "https://api.neshan.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the Neshan client.
#[derive(Debug, Clone)]
pub struct NeshanConfig {
    /// API key sent in the `Api-Key` header
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Vehicle type for directions (`car` or `motorcycle`)
    pub travel_mode: String,
}

impl NeshanConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            travel_mode: "car".to_string(),
        }
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

    /// Set the vehicle type used for directions.
    pub fn with_travel_mode(mut self, mode: impl Into<String>) -> Self {
        self.travel_mode = mode.into();
        self
    }
}

/// Neshan API client.
#[derive(Debug, Clone)]
pub struct NeshanClient {
    http: reqwest::Client,
    base_url: String,
    travel_mode: String,
}

impl NeshanClient {
    /// Create a new client with the given configuration.
    pub fn new(config: NeshanConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key).map_err(|_| ClientError::Api {
            status: 0,
            message: "Invalid API key format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("api-key"), api_key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            travel_mode: config.travel_mode,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ClientError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| ClientError::Json {
            message: e.to_string(),
        })
    }
}

impl PlaceSearchClient for NeshanClient {
    async fn search(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<SearchResult>, ClientError> {
        let url = format!("{}/v1/search", self.base_url);
        let response: SearchResponse = self
            .get_json(
                &url,
                &[
                    ("term", query.to_string()),
                    ("lat", lat.to_string()),
                    ("lng", lng.to_string()),
                ],
            )
            .await?;

        debug!(query, items = response.items.len(), "search response");
        Ok(response.items.into_iter().map(SearchResult::from).collect())
    }
}

impl RouteClient for NeshanClient {
    async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, ClientError> {
        let url = format!("{}/v4/direction", self.base_url);
        let response: DirectionResponse = self
            .get_json(
                &url,
                &[
                    ("origin", origin.to_string()),
                    ("destination", destination.to_string()),
                    ("type", self.travel_mode.clone()),
                ],
            )
            .await?;

        debug!(routes = response.routes.len(), "direction response");
        Ok(response.into_encoded_polyline())
    }
}
