//! Backend data models
//!
//! Employees and transactions as the backend returns them.

mod employee;
mod transaction;

pub use employee::Employee;
pub use transaction::Transaction;
