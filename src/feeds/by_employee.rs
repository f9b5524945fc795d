//! Transactions of a single employee

use std::sync::{Arc, Mutex};

use log::debug;

use super::Tracked;
use crate::cache::{Endpoint, RequestCache, RequestSignature, lock};
use crate::client::{FeedApi, Transaction};
use crate::error::Result;

#[derive(Debug, Default)]
struct FilteredState {
    employee_id: Option<String>,
    data: Option<Vec<Transaction>>,
}

/// Every transaction of the currently filtered employee.
pub struct EmployeeTransactionFeed<C: FeedApi> {
    cache: Arc<RequestCache<C>>,
    state: Mutex<Tracked<FilteredState>>,
}

impl<C: FeedApi> EmployeeTransactionFeed<C> {
    pub fn new(cache: Arc<RequestCache<C>>) -> Self {
        Self {
            cache,
            state: Mutex::new(Tracked::default()),
        }
    }

    /// Load all transactions of `employee_id`, replacing the current list.
    ///
    /// Only the most recently issued fetch is applied.
    pub async fn fetch_by_id(&self, employee_id: &str) -> Result<()> {
        let signature = RequestSignature::transactions_by_employee(employee_id)?;
        let generation = lock(&self.state).supersede();

        let transactions: Vec<Transaction> = self.cache.fetch(&signature).await?;

        let applied = lock(&self.state).apply(generation, |s| {
            s.employee_id = Some(employee_id.to_string());
            s.data = Some(transactions);
        });
        if !applied {
            debug!("Discarding stale {}", signature);
        }
        Ok(())
    }

    /// Drop the local list. The cache is untouched.
    pub fn invalidate_data(&self) {
        lock(&self.state).reset();
    }

    /// Drop cached per-employee responses.
    pub fn clear_cached_results(&self) {
        self.cache.clear_endpoint(Endpoint::TransactionsByEmployee);
    }

    pub fn data(&self) -> Option<Vec<Transaction>> {
        lock(&self.state).get().data.clone()
    }

    /// Employee whose transactions are currently held.
    #[allow(dead_code)]
    pub fn employee_id(&self) -> Option<String> {
        lock(&self.state).get().employee_id.clone()
    }
}
