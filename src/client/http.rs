//! HTTP implementation of the transactions backend

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, StatusCode};

use super::FeedApi;
use super::pagination::FIRST_PAGE;
use crate::cache::{Endpoint, RequestSignature};
use crate::error::{ApiError, ConfigError, Result};

/// Default client-side request budget.
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 10;

/// Backend client speaking plain JSON over HTTP
pub struct HttpFeedClient {
    http: HttpClient,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl HttpFeedClient {
    /// Create a new client against `base_url`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        requests_per_second: u32,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(requests_per_second).ok_or_else(|| {
            ConfigError::Invalid("requests_per_second must be greater than zero".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            rate_limiter,
        })
    }

    /// Path and query string for a signature.
    fn route(signature: &RequestSignature) -> (&'static str, Vec<(&'static str, String)>) {
        match signature.endpoint() {
            Endpoint::Employees => ("/employees", vec![]),
            Endpoint::PaginatedTransactions => {
                let page = signature.param().unwrap_or(FIRST_PAGE);
                ("/paginatedTransactions", vec![("page", page.to_string())])
            }
            Endpoint::TransactionsByEmployee => {
                let id = signature.param().unwrap_or_default();
                ("/transactionsByEmployee", vec![("employeeId", id.to_string())])
            }
        }
    }

    /// Issue a GET and map the status code onto [`ApiError`].
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<serde_json::Value> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.http.get(&url).query(query);
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<serde_json::Value>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
                })?;
                Ok(data)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}

#[async_trait]
impl FeedApi for HttpFeedClient {
    async fn fetch(&self, signature: &RequestSignature) -> Result<serde_json::Value> {
        let (path, query) = Self::route(signature);
        self.get(path, &query).await
    }
}
