//! Caching layer for NaPTAN API responses.
//!
//! The dataset changes at most daily, while a national fetch is tens of
//! megabytes. Responses are cached per area query so repeated lookups for
//! the same areas are served from memory.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::api::{ApiError, NaptanClient, specific_stops_query};
use crate::domain::{StopList, format_area_codes};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached area queries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 64,
        }
    }
}

/// NaPTAN client with caching.
///
/// Wraps a `NaptanClient` and caches decoded stop lists keyed by the
/// formatted area query (`""` for the national dataset).
pub struct CachedNaptanClient {
    client: NaptanClient,
    stops: MokaCache<String, StopList>,
}

impl CachedNaptanClient {
    /// Create a new cached client.
    pub fn new(client: NaptanClient, cache_config: &CacheConfig) -> Self {
        let stops = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self { client, stops }
    }

    /// Get stops for a formatted area query, using the cache if available.
    pub async fn get_stops_for_areas(&self, area_query: &str) -> Result<StopList, ApiError> {
        if let Some(cached) = self.stops.get(area_query).await {
            debug!(areas = area_query, "access-node cache hit");
            return Ok(cached);
        }

        let stops = self.client.get_stops_for_areas(area_query).await?;
        self.stops
            .insert(area_query.to_string(), stops.clone())
            .await;

        Ok(stops)
    }

    /// Get every stop in the national dataset.
    pub async fn get_all_stops(&self) -> Result<StopList, ApiError> {
        self.get_stops_for_areas("").await
    }

    /// Get every stop in the given areas.
    pub async fn get_area_stops<I, S>(&self, area_codes: I) -> Result<StopList, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get_stops_for_areas(&format_area_codes(area_codes))
            .await
    }

    /// Get just the named stops.
    pub async fn get_specific_stops<I, S>(&self, atco_codes: I) -> Result<StopList, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some((area_query, filter)) = specific_stops_query(atco_codes) else {
            return Ok(StopList::new());
        };
        let stops = self.get_stops_for_areas(&area_query).await?;
        Ok(stops.filter(&filter))
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.stops.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.stops.invalidate_all();
    }
}
