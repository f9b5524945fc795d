//! Request signatures and cache key generation

use std::fmt;

use sha2::{Digest, Sha256};

use crate::client::Cursor;
use crate::error::{Error, Result};

/// Backend endpoints that responses are cached for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Full employee list
    Employees,
    /// One page of all transactions
    PaginatedTransactions,
    /// Every transaction of one employee
    TransactionsByEmployee,
}

impl Endpoint {
    /// Stable name used in cache keys and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Employees => "employees",
            Endpoint::PaginatedTransactions => "transactions-paginated",
            Endpoint::TransactionsByEmployee => "transactions-by-employee",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An (endpoint, parameter) pair identifying one cacheable request.
///
/// Equality is structural: two signatures built from equal values hit the
/// same cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestSignature {
    endpoint: Endpoint,
    param: Option<String>,
}

impl RequestSignature {
    /// Signature for the employee list.
    pub fn employees() -> Self {
        Self {
            endpoint: Endpoint::Employees,
            param: None,
        }
    }

    /// Signature for a transactions page. `None` requests the first page.
    pub fn paginated_transactions(cursor: Option<&Cursor>) -> Self {
        Self {
            endpoint: Endpoint::PaginatedTransactions,
            param: cursor.map(|c| c.as_str().to_string()),
        }
    }

    /// Signature for one employee's transactions.
    ///
    /// Rejects the empty id used by the "all employees" sentinel.
    pub fn transactions_by_employee(employee_id: &str) -> Result<Self> {
        if employee_id.trim().is_empty() {
            return Err(Error::InvalidSignature(
                "transactions-by-employee requires a non-empty employee id".to_string(),
            ));
        }
        Ok(Self {
            endpoint: Endpoint::TransactionsByEmployee,
            param: Some(employee_id.to_string()),
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Deterministic storage key for this signature.
    pub fn cache_key(&self) -> String {
        cache_key(self.endpoint.name(), self.param())
    }
}

impl fmt::Display for RequestSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}({})", self.endpoint, param),
            None => write!(f, "{}", self.endpoint),
        }
    }
}

/// Generate a deterministic cache key from endpoint and parameter.
///
/// The key is a SHA-256 hash of the endpoint and parameter. An absent
/// parameter and an empty one hash differently.
pub fn cache_key(endpoint: &str, param: Option<&str>) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");

    match param {
        Some(value) => {
            hasher.update(b"=");
            hasher.update(value.as_bytes());
        }
        None => hasher.update(b"-"),
    }

    format!("{:x}", hasher.finalize())
}
