//! Place search and routing clients.
//!
//! The sessions only depend on the two traits here, so tests can drive
//! them with fakes and hosts can plug in any transport. `NeshanClient` is
//! the HTTP implementation of both.

mod error;
mod neshan;
mod types;

use std::future::Future;

use crate::domain::{Coordinate, SearchResult};

pub use error::ClientError;
pub use neshan::{NeshanClient, NeshanConfig};
pub use types::{DirectionResponse, SearchItem, SearchResponse};

/// Searches for places near a position.
pub trait PlaceSearchClient: Send + Sync + 'static {
    /// Find places matching `query` around (`lat`, `lng`).
    fn search(
        &self,
        query: &str,
        lat: f64,
        lng: f64,
    ) -> impl Future<Output = Result<Vec<SearchResult>, ClientError>> + Send;
}

/// Fetches driving routes.
pub trait RouteClient: Send + Sync + 'static {
    /// Get the encoded overview polyline from `origin` to `destination`.
    ///
    /// An empty string means the service found no route.
    fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> impl Future<Output = Result<String, ClientError>> + Send;
}
