//! Employees command implementation

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::error::Result;
use crate::models::EmployeeDisplay;
use crate::output::print;

/// Run the employees command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let directory = ctx.coordinator.directory();

    directory.fetch_all().await?;
    let employees = directory.data().unwrap_or_default();
    debug!("Fetched {} employees", employees.len());

    let rows: Vec<EmployeeDisplay> = employees.iter().map(EmployeeDisplay::from).collect();
    print(&rows, ctx.format)
}
