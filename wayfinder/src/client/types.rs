//! Wire types for the Neshan search and direction APIs.

use serde::Deserialize;

use crate::domain::{Coordinate, SearchResult};

/// Response from `GET /v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One place in a search response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub title: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub category: String,
    pub location: Location,
}

/// Point in the search API's x/y convention.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    /// Longitude
    pub x: f64,
    /// Latitude
    pub y: f64,
}

/// Response from `GET /v4/direction`.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionResponse {
    #[serde(default)]
    pub routes: Vec<DirectionRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectionRoute {
    pub overview_polyline: OverviewPolyline,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

impl From<SearchItem> for SearchResult {
    fn from(item: SearchItem) -> Self {
        SearchResult {
            title: item.title,
            address: item.address,
            region: item.region,
            category: item.category,
            coordinate: Coordinate::from_degrees(item.location.y, item.location.x),
        }
    }
}

impl DirectionResponse {
    /// Encoded overview polyline of the first route, or an empty string when
    /// the service found no route.
    pub fn into_encoded_polyline(self) -> String {
        self.routes
            .into_iter()
            .next()
            .map(|r| r.overview_polyline.points)
            .unwrap_or_default()
    }
}
