//! Memoizing request cache
//!
//! Wraps any [`FeedApi`] and stores successful responses keyed by their
//! [`RequestSignature`] until explicitly cleared.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::debug;
use serde::de::DeserializeOwned;

use super::key::{Endpoint, RequestSignature};
use super::lock;
use super::storage::{CacheStats, CacheStorage, ClearStats};
use crate::client::FeedApi;
use crate::error::{ApiError, Error, Result};

/// Session-wide response cache.
///
/// One instance is constructed per session and shared by the feeds through
/// an `Arc`. Cache can be disabled via the `enabled` flag (for `--no-cache`),
/// in which case every call goes to the backend.
pub struct RequestCache<C: FeedApi> {
    inner: Arc<C>,
    cache: Option<Mutex<CacheStorage>>,
    in_flight: Mutex<HashMap<Endpoint, usize>>,
}

impl<C: FeedApi> RequestCache<C> {
    /// Create a new cache around a backend client.
    ///
    /// # Arguments
    /// * `inner` - The underlying API client to wrap
    /// * `enabled` - Whether caching is enabled (false for --no-cache)
    pub fn new(inner: C, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            cache: enabled.then(|| Mutex::new(CacheStorage::new())),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Get the wrapped client
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Try to get cached data
    fn get_cached(&self, key: &str) -> Option<Vec<u8>> {
        let cache = self.cache.as_ref()?;
        lock(cache).get(key).map(<[u8]>::to_vec)
    }

    /// Store data in cache
    fn set_cached(&self, key: &str, data: &[u8], endpoint: Endpoint) {
        if let Some(ref cache) = self.cache {
            lock(cache).put(key, data, endpoint);
        }
    }

    /// Fetch `signature`, serving it from the cache when possible.
    ///
    /// Only a response that was received and decoded successfully is stored,
    /// so a failed call can be retried with the same signature.
    pub async fn fetch<T: DeserializeOwned>(&self, signature: &RequestSignature) -> Result<T> {
        let key = signature.cache_key();

        if let Some(cached) = self.get_cached(&key) {
            debug!("Cache hit: {}", signature);
            return decode(signature, &cached);
        }

        debug!("Cache miss: {}", signature);
        let _in_flight = InFlight::begin(&self.in_flight, signature.endpoint());

        let value = self.inner.fetch(signature).await?;
        let body = serde_json::to_vec(&value)?;
        let data = serde_json::from_value(value).map_err(|e| invalid(signature, e))?;

        self.set_cached(&key, &body, signature.endpoint());
        Ok(data)
    }

    /// Remove every cached response.
    ///
    /// Requests already in flight still store their result when they land.
    #[allow(dead_code)]
    pub fn clear(&self) -> ClearStats {
        let stats = match self.cache {
            Some(ref cache) => lock(cache).clear_all(),
            None => ClearStats { entries_removed: 0 },
        };
        debug!("Cleared {} cache entries", stats.entries_removed);
        stats
    }

    /// Remove cached responses of one endpoint family.
    pub fn clear_endpoint(&self, endpoint: Endpoint) -> ClearStats {
        let stats = match self.cache {
            Some(ref cache) => lock(cache).delete_by_endpoint(endpoint),
            None => ClearStats { entries_removed: 0 },
        };
        debug!("Cleared {} {} cache entries", stats.entries_removed, endpoint);
        stats
    }

    /// Whether any fetch started through this cache is outstanding.
    #[allow(dead_code)]
    pub fn is_loading(&self) -> bool {
        !lock(&self.in_flight).is_empty()
    }

    /// Whether a fetch for `endpoint` is outstanding.
    pub fn is_loading_endpoint(&self, endpoint: Endpoint) -> bool {
        lock(&self.in_flight).contains_key(&endpoint)
    }

    /// Current cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.cache
            .as_ref()
            .map(|cache| lock(cache).stats())
            .unwrap_or_default()
    }
}

fn decode<T: DeserializeOwned>(signature: &RequestSignature, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| invalid(signature, e))
}

fn invalid(signature: &RequestSignature, err: serde_json::Error) -> Error {
    ApiError::InvalidResponse(format!("Unexpected {} payload: {}", signature, err)).into()
}

/// Marks one fetch as outstanding until dropped.
struct InFlight<'a> {
    counts: &'a Mutex<HashMap<Endpoint, usize>>,
    endpoint: Endpoint,
}

impl<'a> InFlight<'a> {
    fn begin(counts: &'a Mutex<HashMap<Endpoint, usize>>, endpoint: Endpoint) -> Self {
        *lock(counts).entry(endpoint).or_insert(0) += 1;
        Self { counts, endpoint }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut counts = lock(self.counts);
        if let Some(count) = counts.get_mut(&self.endpoint) {
            *count -= 1;
            if *count == 0 {
                counts.remove(&self.endpoint);
            }
        }
    }
}
