//! Active-view coordination
//!
//! [`ViewCoordinator`] decides which transaction feed is authoritative and
//! invalidates the other one before issuing a new fetch, so at most one feed
//! holds data at any time.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use serde::Serialize;

use crate::cache::{RequestCache, RequestSignature, lock};
use crate::client::{Employee, FeedApi, Transaction};
use crate::error::Result;
use crate::feeds::{EmployeeDirectory, EmployeeTransactionFeed, PaginatedTransactionFeed};

/// Which feed's data is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "employee_id", rename_all = "lowercase")]
pub enum ActiveView {
    All,
    Filtered(String),
}

impl fmt::Display for ActiveView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActiveView::All => write!(f, "all transactions"),
            ActiveView::Filtered(id) => write!(f, "transactions of employee {}", id),
        }
    }
}

/// The displayed transaction list: paginated data if present, otherwise the
/// per-employee data.
pub fn derive_active(
    paginated: Option<Vec<Transaction>>,
    by_employee: Option<Vec<Transaction>>,
) -> Option<Vec<Transaction>> {
    paginated.or(by_employee)
}

/// Counted loading flag. Raised while at least one guard is alive.
#[derive(Debug, Default)]
pub struct LoadingFlag(AtomicUsize);

impl LoadingFlag {
    pub fn raise(&self) -> LoadingGuard<'_> {
        self.0.fetch_add(1, Ordering::SeqCst);
        LoadingGuard(self)
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst) > 0
    }
}

/// Lowers its [`LoadingFlag`] when dropped.
#[derive(Debug)]
pub struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Everything a renderer needs, read at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub active_view: ActiveView,
    pub transactions: Option<Vec<Transaction>>,
    pub employees: Option<Vec<Employee>>,
    pub filter_options: Vec<Employee>,
    pub is_loading_employees: bool,
    pub is_loading_transactions: bool,
    pub has_next_page: bool,
}

/// Owns the feeds of one session and the transitions between views.
pub struct ViewCoordinator<C: FeedApi> {
    cache: Arc<RequestCache<C>>,
    directory: EmployeeDirectory<C>,
    paginated: PaginatedTransactionFeed<C>,
    by_employee: EmployeeTransactionFeed<C>,
    active: Mutex<ActiveView>,
    loading_employees: LoadingFlag,
    loading_transactions: LoadingFlag,
}

impl<C: FeedApi> ViewCoordinator<C> {
    /// Build the feeds of a session around a shared cache.
    pub fn new(cache: Arc<RequestCache<C>>) -> Self {
        Self {
            directory: EmployeeDirectory::new(cache.clone()),
            paginated: PaginatedTransactionFeed::new(cache.clone()),
            by_employee: EmployeeTransactionFeed::new(cache.clone()),
            cache,
            active: Mutex::new(ActiveView::All),
            loading_employees: LoadingFlag::default(),
            loading_transactions: LoadingFlag::default(),
        }
    }

    pub fn cache(&self) -> &RequestCache<C> {
        &self.cache
    }

    pub fn directory(&self) -> &EmployeeDirectory<C> {
        &self.directory
    }

    /// Show all transactions, loading employees and the next page together.
    ///
    /// Also serves "view more": after the first page every call appends the
    /// following one. Both fetches always run to completion; the first error
    /// is returned.
    pub async fn load_all(&self) -> Result<()> {
        debug!("Transition to all transactions");
        let employees_loading = self.loading_employees.raise();
        let transactions_loading = self.loading_transactions.raise();

        self.by_employee.invalidate_data();
        *lock(&self.active) = ActiveView::All;

        let employees = async move {
            let result = self.directory.fetch_all().await;
            drop(employees_loading);
            result
        };
        let transactions = async move {
            let result = self.paginated.fetch_all().await;
            drop(transactions_loading);
            result
        };

        let (employees, transactions) = futures::join!(employees, transactions);
        employees.and(transactions)
    }

    /// Show only the transactions of `employee_id`.
    pub async fn load_by_employee(&self, employee_id: &str) -> Result<()> {
        RequestSignature::transactions_by_employee(employee_id)?;
        debug!("Transition to employee {}", employee_id);
        let _loading = self.loading_transactions.raise();

        self.paginated.invalidate_data();
        *lock(&self.active) = ActiveView::Filtered(employee_id.to_string());

        self.by_employee.fetch_by_id(employee_id).await
    }

    /// Run the initial load unless employees are loaded or loading.
    pub async fn ensure_initial_load(&self) -> Result<()> {
        if self.directory.is_loaded()
            || self.is_loading_employees()
            || self.directory.is_loading()
        {
            return Ok(());
        }
        self.load_all().await
    }

    /// Apply a committed filter. `None` or the sentinel shows everything.
    pub async fn on_filter_change(&self, employee: Option<&Employee>) -> Result<()> {
        match employee {
            Some(employee) if !employee.is_empty_sentinel() => {
                self.load_by_employee(&employee.id).await
            }
            _ => self.load_all().await,
        }
    }

    pub async fn on_view_more(&self) -> Result<()> {
        self.load_all().await
    }

    /// Drop cached transaction responses of both feeds.
    pub fn on_clear_cache(&self) {
        debug!("Clearing cached transactions");
        self.paginated.clear_cached_results();
        self.by_employee.clear_cached_results();
    }

    pub fn transactions(&self) -> Option<Vec<Transaction>> {
        derive_active(self.paginated.data(), self.by_employee.data())
    }

    pub fn employees(&self) -> Option<Vec<Employee>> {
        self.directory.data()
    }

    /// Filter choices, with the "all employees" sentinel first.
    pub fn filter_options(&self) -> Vec<Employee> {
        match self.directory.data() {
            None => Vec::new(),
            Some(employees) => std::iter::once(Employee::empty()).chain(employees).collect(),
        }
    }

    pub fn is_loading_employees(&self) -> bool {
        self.loading_employees.is_raised()
    }

    pub fn is_loading_transactions(&self) -> bool {
        self.loading_transactions.is_raised()
    }

    pub fn has_next_page(&self) -> bool {
        self.paginated.has_next_page()
    }

    /// More pages exist and none is currently being fetched.
    pub fn can_view_more(&self) -> bool {
        self.has_next_page() && !self.paginated.is_loading()
    }

    pub fn active_view(&self) -> ActiveView {
        lock(&self.active).clone()
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            active_view: self.active_view(),
            transactions: self.transactions(),
            employees: self.employees(),
            filter_options: self.filter_options(),
            is_loading_employees: self.is_loading_employees(),
            is_loading_transactions: self.is_loading_transactions(),
            has_next_page: self.has_next_page(),
        }
    }
}
