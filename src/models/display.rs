//! Display model implementations for table and JSON output

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::client::{Employee, Transaction};
use crate::error::Result;
use crate::output::json::format_json_with;
use crate::output::table::format_table;
use crate::output::{Formattable, json::format_json};
use crate::view::{ActiveView, ViewSnapshot};

/// Truncate string to max length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an amount with two decimals and thousands separators.
pub fn format_amount(amount: f64) -> String {
    let formatted = format!("{:.2}", amount.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Employee row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct EmployeeDisplay {
    #[tabled(rename = "EMPLOYEE ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl From<&Employee> for EmployeeDisplay {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.full_name(),
        }
    }
}

/// Transaction row.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TransactionDisplay {
    #[tabled(rename = "ID")]
    pub id: String,

    #[tabled(rename = "DATE")]
    pub date: String,

    #[tabled(rename = "EMPLOYEE")]
    pub employee: String,

    #[tabled(rename = "MERCHANT")]
    pub merchant: String,

    #[tabled(rename = "AMOUNT")]
    pub amount: String,

    #[tabled(rename = "APPROVED")]
    pub approved: String,
}

impl From<&Transaction> for TransactionDisplay {
    fn from(transaction: &Transaction) -> Self {
        let or_dash = |s: &str| {
            if s.is_empty() {
                "--".to_string()
            } else {
                s.to_string()
            }
        };

        Self {
            id: transaction.id.clone(),
            date: or_dash(&transaction.date),
            employee: transaction.employee.full_name(),
            merchant: truncate_string(&or_dash(&transaction.merchant), 32),
            amount: format_amount(transaction.amount),
            approved: if transaction.approved { "yes" } else { "no" }.to_string(),
        }
    }
}

impl Formattable for Vec<EmployeeDisplay> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json(self)?),
            OutputFormat::Table => Ok(format_table(self)),
            OutputFormat::Pretty => {
                if self.is_empty() {
                    return Ok("No employees found.".to_string());
                }
                let mut out = format!("{}\n", "Employees".bold());
                for employee in self {
                    out.push_str(&format!("  {}  {}\n", employee.id.dimmed(), employee.name));
                }
                out.push_str(&format!("\n{} employees", self.len()));
                Ok(out)
            }
        }
    }
}

/// The displayed transaction list together with its view state.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionListing {
    pub view: ActiveView,
    pub has_next_page: bool,
    pub transactions: Vec<TransactionDisplay>,
}

impl From<&ViewSnapshot> for TransactionListing {
    fn from(snapshot: &ViewSnapshot) -> Self {
        Self {
            view: snapshot.active_view.clone(),
            has_next_page: snapshot.has_next_page,
            transactions: snapshot
                .transactions
                .iter()
                .flatten()
                .map(TransactionDisplay::from)
                .collect(),
        }
    }
}

impl TransactionListing {
    fn heading(&self) -> String {
        match &self.view {
            ActiveView::All => "All transactions".to_string(),
            ActiveView::Filtered(_) => match self.transactions.first() {
                Some(first) => format!("Transactions of {}", first.employee),
                None => "Transactions of selected employee".to_string(),
            },
        }
    }

    fn more_hint(&self) -> Option<&'static str> {
        self.has_next_page
            .then_some("More transactions available. Continue with --pages <N+1> or `txfeed browse`.")
    }
}

impl Formattable for TransactionListing {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(format_json_with(&self.transactions, |meta| {
                meta.view = Some(self.view.clone());
                meta.has_next_page = Some(self.has_next_page);
            })?),
            OutputFormat::Table => {
                let mut out = format_table(&self.transactions);
                if let Some(hint) = self.more_hint() {
                    out.push('\n');
                    out.push_str(hint);
                }
                Ok(out)
            }
            OutputFormat::Pretty => {
                let mut out = format!("{}\n", self.heading().bold());
                if self.transactions.is_empty() {
                    out.push_str("No transactions.");
                    return Ok(out);
                }
                for tx in &self.transactions {
                    let mark = if tx.approved == "yes" {
                        "✓".green()
                    } else {
                        "·".dimmed()
                    };
                    out.push_str(&format!(
                        "{} {:>12}  {:<32}  {}  {}\n",
                        mark,
                        tx.amount,
                        tx.merchant,
                        tx.employee,
                        tx.date.dimmed()
                    ));
                }
                out.push_str(&format!("\n{} transactions", self.transactions.len()));
                if let Some(hint) = self.more_hint() {
                    out.push_str(&format!("\n{}", hint.cyan()));
                }
                Ok(out)
            }
        }
    }
}
