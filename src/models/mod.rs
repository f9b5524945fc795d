//! Display models for CLI output
//!
//! Converts backend records and view state into CLI-friendly rows.

pub mod display;

pub use display::{EmployeeDisplay, TransactionListing};
