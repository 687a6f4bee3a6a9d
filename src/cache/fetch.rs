//! Generic TTL-cached fetch helper
//!
//! Every dashboard data source follows the same pattern: check the cache,
//! invoke a producer on miss, store the result with a fresh expiry, return
//! it. `fetch_cached` captures that pattern once so each client only has to
//! supply its producer (one HTTP call plus parsing).

use std::future::Future;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::CacheManager;

/// Errors that can occur when fetching remote data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (connection error or timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failed to decode a JSON response
    #[error("Failed to decode JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response structure did not match expectations
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Returns the cached value for `key` if still fresh, otherwise invokes
/// `producer` and caches its result for `ttl`.
///
/// An expired entry is treated as absent. The producer is invoked at most
/// once per call, and its failure is never written to the cache, so the next
/// call retries instead of serving a stale failure. Dropping the returned
/// future abandons any in-flight request without touching the cache.
///
/// # Arguments
/// * `cache` - The backing store; `None` disables caching entirely
/// * `key` - Non-empty cache key identifying this data source
/// * `ttl` - How long a produced value stays fresh
/// * `producer` - Fetches and parses the upstream data on cache miss
pub async fn fetch_cached<T, F, Fut>(
    cache: Option<&CacheManager>,
    key: &str,
    ttl: Duration,
    producer: F,
) -> Result<T, FetchError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    debug_assert!(!key.is_empty(), "cache key must be non-empty");

    if let Some(cache) = cache {
        if let Some(cached) = cache.read::<T>(key) {
            if !cached.is_expired {
                return Ok(cached.data);
            }
        }
    }

    let value = producer().await?;

    // Cache the result
    if let Some(cache) = cache {
        let _ = cache.write(key, &value, ttl);
    }

    Ok(value)
}
