//! Employee model

use serde::{Deserialize, Serialize};

/// Id carried by the "all employees" sentinel.
pub const EMPTY_EMPLOYEE_ID: &str = "";

/// Employee as returned by the `employees` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Employee ID
    pub id: String,

    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,
}

impl Employee {
    /// The sentinel entry that stands for "no employee filter".
    ///
    /// It is only ever shown as the first filter option; its id is never sent
    /// to the backend.
    pub fn empty() -> Self {
        Self {
            id: EMPTY_EMPLOYEE_ID.to_string(),
            first_name: "All".to_string(),
            last_name: "Employees".to_string(),
        }
    }

    /// Whether this is the "no filter" sentinel.
    pub fn is_empty_sentinel(&self) -> bool {
        self.id == EMPTY_EMPLOYEE_ID
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
