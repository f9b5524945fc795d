//! Test fixtures and builders for API model types
//!
//! Provides builder patterns for creating test data with sensible defaults.
//! Import via `use crate::client::fixtures::*` in test modules.

#![allow(dead_code)]

use super::models::{Employee, Transaction};
use super::pagination::{Cursor, Page};

// ============================================================================
// EmployeeBuilder
// ============================================================================

/// Builder for creating test Employee instances.
///
/// # Example
/// ```ignore
/// let ana = EmployeeBuilder::new("1").name("Ana", "Lee").build();
/// ```
#[derive(Debug, Clone)]
pub struct EmployeeBuilder {
    id: String,
    first_name: String,
    last_name: String,
}

impl EmployeeBuilder {
    /// Create a new builder with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            first_name: "Employee".to_string(),
            last_name: id.clone(),
            id,
        }
    }

    /// Set first and last name.
    pub fn name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// Build the Employee.
    pub fn build(self) -> Employee {
        Employee {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

// ============================================================================
// TransactionBuilder
// ============================================================================

/// Builder for creating test Transaction instances.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    id: String,
    amount: f64,
    employee: Employee,
    merchant: String,
    date: String,
    approved: bool,
}

impl TransactionBuilder {
    /// Create a new builder with the given ID, owned by a default employee.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            merchant: format!("Merchant {}", &id),
            id,
            amount: 10.0,
            employee: EmployeeBuilder::new("1").name("Ana", "Lee").build(),
            date: "2024-01-01".to_string(),
            approved: false,
        }
    }

    /// Set the owning employee.
    pub fn employee(mut self, employee: &Employee) -> Self {
        self.employee = employee.clone();
        self
    }

    /// Set the amount.
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    /// Mark as approved.
    pub fn approved(mut self) -> Self {
        self.approved = true;
        self
    }

    /// Build the Transaction.
    pub fn build(self) -> Transaction {
        Transaction {
            id: self.id,
            amount: self.amount,
            employee: self.employee,
            merchant: self.merchant,
            date: self.date,
            approved: self.approved,
        }
    }
}

// ============================================================================
// Shortcuts
// ============================================================================

/// Ana Lee, employee "1".
pub fn ana() -> Employee {
    EmployeeBuilder::new("1").name("Ana", "Lee").build()
}

/// Bo Diaz, employee "2".
pub fn bo() -> Employee {
    EmployeeBuilder::new("2").name("Bo", "Diaz").build()
}

/// Transaction with the given id owned by `employee`.
pub fn tx(id: &str, employee: &Employee) -> Transaction {
    TransactionBuilder::new(id).employee(employee).build()
}

/// Page of transactions with an optional next cursor.
pub fn page(data: Vec<Transaction>, next_page: Option<&str>) -> Page<Transaction> {
    Page::new(data, next_page.map(Cursor::new))
}
