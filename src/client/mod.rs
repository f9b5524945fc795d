//! Transactions backend client
//!
//! The rest of the crate talks to the backend through [`FeedApi`], an
//! abstract `fetch(signature) -> JSON` capability. [`HttpFeedClient`] is the
//! real implementation; tests use `MockFeedClient`.

use async_trait::async_trait;

use crate::cache::RequestSignature;
use crate::error::Result;

#[cfg(test)]
pub mod fixtures;
pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use http::HttpFeedClient;
#[cfg(test)]
pub use mock::MockFeedClient;
pub use models::{Employee, Transaction};
pub use pagination::{Cursor, Page};

/// Backend fetch capability.
///
/// Implementations perform exactly one request per call and never cache;
/// caching is layered on top by [`crate::cache::RequestCache`].
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch the raw JSON response for a request signature.
    async fn fetch(&self, signature: &RequestSignature) -> Result<serde_json::Value>;
}
