//! Mock backend client for testing
//!
//! Provides a mock implementation of [`FeedApi`] for unit testing without
//! making real API calls. Individual endpoints can be held open with a gate
//! so tests can observe state while a fetch is in flight.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore};

use super::FeedApi;
use super::models::{Employee, Transaction};
use super::pagination::Page;
use crate::cache::{Endpoint, RequestSignature};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockFeedClient::new()
///     .with_employees(vec![fixtures::ana()])
///     .await;
///
/// let cache = RequestCache::new(mock, true);
/// ```
#[derive(Default)]
pub struct MockFeedClient {
    /// Employees to return from the employees endpoint
    employees: Arc<Mutex<Vec<Employee>>>,
    /// Transaction pages keyed by requested cursor (`None` = first page)
    pages: Arc<Mutex<HashMap<Option<String>, Page<Transaction>>>>,
    /// Per-employee transaction lists
    by_employee: Arc<Mutex<HashMap<String, Vec<Transaction>>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<RequestSignature>>>,
    /// Endpoints whose responses wait for a permit
    gates: Arc<Mutex<HashMap<Endpoint, Arc<Semaphore>>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CallCounts {
    pub employees: usize,
    pub paginated_transactions: usize,
    pub transactions_by_employee: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.employees + self.paginated_transactions + self.transactions_by_employee
    }
}

impl MockFeedClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure employees to return.
    pub async fn with_employees(self, employees: Vec<Employee>) -> Self {
        *self.employees.lock().await = employees;
        self
    }

    /// Configure the page returned for `cursor` (`None` = first page).
    pub async fn with_page(self, cursor: Option<&str>, page: Page<Transaction>) -> Self {
        self.pages
            .lock()
            .await
            .insert(cursor.map(String::from), page);
        self
    }

    /// Configure the transactions returned for one employee.
    pub async fn with_employee_transactions(
        self,
        employee_id: &str,
        transactions: Vec<Transaction>,
    ) -> Self {
        self.by_employee
            .lock()
            .await
            .insert(employee_id.to_string(), transactions);
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Queue an error for the next call on an already shared client.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Hold responses for `endpoint` until a permit is added to the
    /// returned semaphore. Each permit releases one response.
    pub async fn hold(&self, endpoint: Endpoint) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.gates.lock().await.insert(endpoint, gate.clone());
        gate
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<RequestSignature> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn record(&self, signature: &RequestSignature) {
        {
            let mut counts = self.call_count.lock().await;
            match signature.endpoint() {
                Endpoint::Employees => counts.employees += 1,
                Endpoint::PaginatedTransactions => counts.paginated_transactions += 1,
                Endpoint::TransactionsByEmployee => counts.transactions_by_employee += 1,
            }
        }
        self.captured_requests.lock().await.push(signature.clone());
    }

    async fn wait_for_gate(&self, endpoint: Endpoint) -> Result<()> {
        let gate = self.gates.lock().await.get(&endpoint).cloned();
        if let Some(gate) = gate {
            gate.acquire()
                .await
                .map_err(|e| ApiError::Network(e.to_string()))?
                .forget();
        }
        Ok(())
    }
}

#[async_trait]
impl FeedApi for MockFeedClient {
    async fn fetch(&self, signature: &RequestSignature) -> Result<serde_json::Value> {
        self.record(signature).await;
        self.wait_for_gate(signature.endpoint()).await?;
        self.check_error().await?;

        let value = match signature.endpoint() {
            Endpoint::Employees => serde_json::to_value(&*self.employees.lock().await)?,
            Endpoint::PaginatedTransactions => {
                let pages = self.pages.lock().await;
                let key = signature.param().map(String::from);
                let page = pages
                    .get(&key)
                    .ok_or_else(|| ApiError::NotFound(signature.to_string()))?;
                serde_json::to_value(page)?
            }
            Endpoint::TransactionsByEmployee => {
                let by_employee = self.by_employee.lock().await;
                let transactions = signature
                    .param()
                    .and_then(|id| by_employee.get(id))
                    .ok_or_else(|| ApiError::NotFound(signature.to_string()))?;
                serde_json::to_value(transactions)?
            }
        };

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::*;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockFeedClient::new();

        let employees = mock.fetch(&RequestSignature::employees()).await.unwrap();
        assert_eq!(employees, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_mock_client_unknown_page_is_not_found() {
        let mock = MockFeedClient::new();

        let result = mock
            .fetch(&RequestSignature::paginated_transactions(None))
            .await;
        assert!(matches!(
            result,
            Err(crate::error::Error::Api(ApiError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockFeedClient::new()
            .with_error(ApiError::ServerError("boom".into()))
            .await;

        let result = mock.fetch(&RequestSignature::employees()).await;
        assert!(result.is_err());

        // Error is consumed, next call succeeds
        let result = mock.fetch(&RequestSignature::employees()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_call_counts_and_captures() {
        let mock = MockFeedClient::new()
            .with_employee_transactions("1", vec![tx("a", &ana())])
            .await;
        let by_ana = RequestSignature::transactions_by_employee("1").unwrap();

        mock.fetch(&RequestSignature::employees()).await.unwrap();
        mock.fetch(&by_ana).await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.employees, 1);
        assert_eq!(counts.transactions_by_employee, 1);
        assert_eq!(counts.total(), 2);
        assert_eq!(mock.captured_requests().await[1], by_ana);
    }

    #[tokio::test]
    async fn test_mock_client_gate_holds_response() {
        let mock = MockFeedClient::new();
        let gate = mock.hold(Endpoint::Employees).await;

        let signature = RequestSignature::employees();
        let fetch = mock.fetch(&signature);
        let release = async {
            tokio::task::yield_now().await;
            assert_eq!(mock.call_counts().await.employees, 1);
            gate.add_permits(1);
        };

        let (result, _) = tokio::join!(fetch, release);
        assert!(result.is_ok());
    }
}
