//! Transactions command implementation

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::Employee;
use crate::error::{Error, Result};
use crate::models::TransactionListing;
use crate::output::print;

/// Run the transactions command
///
/// Loads employees and the first page, then either applies the employee
/// filter or loads further pages.
pub async fn list(opts: &GlobalOptions, employee: Option<&str>, pages: u32) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let coordinator = &ctx.coordinator;
    let spinner = spinner(ctx.format);

    spinner.set_message("Loading employees and transactions...");
    coordinator.ensure_initial_load().await?;

    if let Some(employee_id) = employee {
        let selected = find_employee(coordinator.filter_options(), employee_id)?;

        spinner.set_message(format!("Loading transactions of {}...", selected.full_name()));
        coordinator.on_filter_change(Some(&selected)).await?;
    } else {
        for page in 2..=pages {
            if !coordinator.can_view_more() {
                debug!("Stopped at page {}: no further pages", page - 1);
                break;
            }
            spinner.set_message(format!("Loading page {}...", page));
            coordinator.on_view_more().await?;
        }
    }

    spinner.finish_and_clear();

    let listing = TransactionListing::from(&coordinator.snapshot());
    print(&listing, ctx.format)
}

/// Look `employee_id` up among the loaded filter options.
fn find_employee(options: Vec<Employee>, employee_id: &str) -> Result<Employee> {
    options
        .into_iter()
        .find(|e| e.id == employee_id && !e.is_empty_sentinel())
        .ok_or_else(|| Error::Other(format!("No employee with ID '{}'", employee_id)))
}

/// Spinner on stderr; hidden for JSON so output stays machine readable.
fn spinner(format: OutputFormat) -> ProgressBar {
    if format == OutputFormat::Json {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
