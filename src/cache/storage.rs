//! In-memory response storage
//!
//! Entries live for the lifetime of the process and are only removed by an
//! explicit clear. There is no expiry.

use std::collections::HashMap;

use chrono::Utc;

use super::key::Endpoint;

/// A stored response body.
#[derive(Debug, Clone)]
struct CacheEntry {
    endpoint: Endpoint,
    data: Vec<u8>,
    created_at: i64,
}

/// Keyed store of serialized responses.
#[derive(Debug, Default)]
pub struct CacheStorage {
    entries: HashMap<String, CacheEntry>,
}

impl CacheStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached response body by key.
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|e| e.data.as_slice())
    }

    /// Store a response body, replacing any previous entry for `key`.
    pub fn put(&mut self, key: &str, data: &[u8], endpoint: Endpoint) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                endpoint,
                data: data.to_vec(),
                created_at: Utc::now().timestamp(),
            },
        );
    }

    /// Clear all cache entries
    #[allow(dead_code)]
    pub fn clear_all(&mut self) -> ClearStats {
        let entries_removed = self.entries.len();
        self.entries.clear();
        ClearStats { entries_removed }
    }

    /// Delete every entry that belongs to one endpoint.
    pub fn delete_by_endpoint(&mut self, endpoint: Endpoint) -> ClearStats {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.endpoint != endpoint);
        ClearStats {
            entries_removed: before - self.entries.len(),
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            total_size_bytes: self.entries.values().map(|e| e.data.len()).sum(),
            oldest_entry: self.entries.values().map(|e| e.created_at).min(),
            newest_entry: self.entries.values().map(|e| e.created_at).max(),
        }
    }
}

/// Statistics about cache clear operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub total_size_bytes: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
