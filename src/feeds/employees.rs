//! Employee directory

use std::sync::{Arc, Mutex};

use log::debug;

use super::Tracked;
use crate::cache::{Endpoint, RequestCache, RequestSignature, lock};
use crate::client::{Employee, FeedApi};
use crate::error::Result;

/// The employee list, loaded once per session.
pub struct EmployeeDirectory<C: FeedApi> {
    cache: Arc<RequestCache<C>>,
    state: Mutex<Tracked<Option<Vec<Employee>>>>,
}

impl<C: FeedApi> EmployeeDirectory<C> {
    pub fn new(cache: Arc<RequestCache<C>>) -> Self {
        Self {
            cache,
            state: Mutex::new(Tracked::default()),
        }
    }

    /// Load the employee list. Repeated calls are served from the cache.
    pub async fn fetch_all(&self) -> Result<()> {
        let generation = lock(&self.state).generation();

        let employees: Vec<Employee> = self.cache.fetch(&RequestSignature::employees()).await?;
        debug!("Loaded {} employees", employees.len());

        if !lock(&self.state).apply(generation, |data| *data = Some(employees)) {
            debug!("Discarding employee list fetched before invalidation");
        }
        Ok(())
    }

    /// Forget the loaded list. The cache is untouched.
    #[allow(dead_code)]
    pub fn invalidate_data(&self) {
        lock(&self.state).reset();
    }

    /// Drop cached employee responses.
    #[allow(dead_code)]
    pub fn clear_cached_results(&self) {
        self.cache.clear_endpoint(Endpoint::Employees);
    }

    /// Whether an employee fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.cache.is_loading_endpoint(Endpoint::Employees)
    }

    /// The loaded list, or `None` before the first successful fetch.
    pub fn data(&self) -> Option<Vec<Employee>> {
        lock(&self.state).get().clone()
    }

    pub fn is_loaded(&self) -> bool {
        lock(&self.state).get().is_some()
    }
}
