//! Caching layer for route responses.
//!
//! Repeating a route request for the same pair of points (for example after
//! reselecting a favorite) reuses the encoded polyline from the last
//! successful response. Points are quantized to the polyline precision, so
//! positions that encode identically share an entry.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::client::{ClientError, RouteClient};
use crate::domain::Coordinate;

/// Cache key: origin and destination in 1e-5 degree units.
type RouteKey = (i64, i64, i64, i64);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 256,
        }
    }
}

fn quantize(degrees: f64) -> i64 {
    (degrees * 1e5).round() as i64
}

fn route_key(origin: Coordinate, destination: Coordinate) -> RouteKey {
    (
        quantize(origin.latitude),
        quantize(origin.longitude),
        quantize(destination.latitude),
        quantize(destination.longitude),
    )
}

/// Route client with caching.
///
/// Wraps any [`RouteClient`]. Only successful responses are cached.
pub struct CachedRouteClient<R> {
    client: R,
    routes: MokaCache<RouteKey, String>,
}

impl<R: RouteClient> CachedRouteClient<R> {
    /// Create a new cached client.
    pub fn new(client: R, config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, routes }
    }

    /// Access the underlying client for requests that bypass the cache.
    pub fn client(&self) -> &R {
        &self.client
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.routes.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.routes.invalidate_all();
    }
}

impl<R: RouteClient> RouteClient for CachedRouteClient<R> {
    async fn get_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<String, ClientError> {
        let key = route_key(origin, destination);

        if let Some(cached) = self.routes.get(&key).await {
            trace!(%origin, %destination, "route cache hit");
            return Ok(cached);
        }

        let encoded = self.client.get_route(origin, destination).await?;
        self.routes.insert(key, encoded.clone()).await;

        Ok(encoded)
    }
}
