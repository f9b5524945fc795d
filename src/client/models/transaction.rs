//! Transaction model

use serde::{Deserialize, Serialize};

use super::Employee;

/// Transaction record.
///
/// Treated as an immutable payload from the backend; only `id` and
/// `employee` are required on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Transaction ID
    pub id: String,

    /// Amount in account currency
    #[serde(default)]
    pub amount: f64,

    /// Employee who made the transaction
    pub employee: Employee,

    /// Merchant name
    #[serde(default)]
    pub merchant: String,

    /// Transaction date as sent by the backend (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,

    /// Approval state
    #[serde(default)]
    pub approved: bool,
}
