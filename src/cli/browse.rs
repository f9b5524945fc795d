//! Interactive browse command
//!
//! Loads run as background tasks while the prompt stays responsive, so a
//! filter change attempted during a load goes through the selection guard.

use std::sync::Arc;
use std::time::Duration;

use colored::Colorize;
use dialoguer::{Select, theme::ColorfulTheme};
use indicatif::ProgressBar;
use log::debug;
use tokio::task::JoinHandle;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{Employee, HttpFeedClient};
use crate::error::{Error, Result};
use crate::models::TransactionListing;
use crate::output::Formattable;
use crate::view::{EMPTY_LABEL, FilterSelect, Menu, Selectable, SelectionOutcome, ViewCoordinator};

type Coordinator = Arc<ViewCoordinator<HttpFeedClient>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Filter,
    ViewMore,
    Wait,
    Refresh,
    ClearCache,
    Quit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Filter => "Filter by employee",
            Action::ViewMore => "View more",
            Action::Wait => "Wait for loading to finish",
            Action::Refresh => "Refresh",
            Action::ClearCache => "Clear cached transactions",
            Action::Quit => "Quit",
        }
    }
}

/// Actions offered for the current state.
fn available_actions(can_view_more: bool, loading: bool) -> Vec<Action> {
    let mut actions = vec![Action::Filter];
    if can_view_more {
        actions.push(Action::ViewMore);
    }
    if loading {
        actions.push(Action::Wait);
    }
    actions.extend([Action::Refresh, Action::ClearCache, Action::Quit]);
    actions
}

/// Run the browse command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let coordinator = ctx.coordinator.clone();
    // JSON is not readable between prompts
    let format = match ctx.format {
        OutputFormat::Json => OutputFormat::Pretty,
        other => other,
    };

    let mut select: FilterSelect<Employee> =
        FilterSelect::new("Filter by employee", "Loading employees").with_default(Employee::empty());

    let initial = coordinator.clone();
    let mut pending = vec![tokio::spawn(async move { initial.ensure_initial_load().await })];

    loop {
        report_finished(&mut pending).await;
        render(&coordinator, &select, format)?;

        let loading = !pending.is_empty();
        let actions = available_actions(coordinator.can_view_more(), loading);
        let labels: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();

        let Some(choice) = prompt_select("What next?", labels, 0).await? else {
            break;
        };

        match actions[choice] {
            Action::Filter => {
                if let Some(load) = choose_filter(&coordinator, &mut select).await? {
                    pending.push(load);
                }
            }
            Action::ViewMore => {
                let c = coordinator.clone();
                pending.push(tokio::spawn(async move { c.on_view_more().await }));
            }
            Action::Wait => wait_all(&mut pending).await,
            Action::Refresh => {}
            Action::ClearCache => {
                coordinator.on_clear_cache();
                println!("{} Cleared cached transactions", "✓".green());
            }
            Action::Quit => break,
        }
    }

    for handle in pending {
        handle.abort();
    }
    Ok(())
}

/// Prompt for an employee and route the choice through the selection guard.
///
/// Returns the spawned load when the selection was committed.
async fn choose_filter(
    coordinator: &Coordinator,
    select: &mut FilterSelect<Employee>,
) -> Result<Option<JoinHandle<Result<()>>>> {
    let options = coordinator.filter_options();

    let items = match select.menu(&options, coordinator.is_loading_employees()) {
        Menu::Loading(label) => {
            println!("{}", label.dimmed());
            return Ok(None);
        }
        Menu::Empty => {
            println!("{}", EMPTY_LABEL.dimmed());
            return Ok(None);
        }
        Menu::Items(items) => items,
    };

    let labels: Vec<String> = items
        .iter()
        .map(|item| {
            if item.selected {
                format!("{} (current)", item.label)
            } else {
                item.label.clone()
            }
        })
        .collect();
    let default = select.position(&options).unwrap_or(0);

    let picked = prompt_select(select.label(), labels, default).await?;
    let candidate = picked.and_then(|idx| options.get(idx).cloned());

    match select.select(candidate, coordinator.is_loading_transactions()) {
        SelectionOutcome::Committed(employee) => {
            debug!("Filter committed: {}", employee.display());
            let c = coordinator.clone();
            Ok(Some(tokio::spawn(async move {
                c.on_filter_change(Some(&employee)).await
            })))
        }
        SelectionOutcome::Rejected { keep } => {
            println!(
                "{} Transactions are still loading; keeping filter: {}",
                "⚠".yellow(),
                keep.map(|e| e.display()).unwrap_or_default().bold()
            );
            Ok(None)
        }
        SelectionOutcome::Ignored => Ok(None),
    }
}

fn render(
    coordinator: &Coordinator,
    select: &FilterSelect<Employee>,
    format: OutputFormat,
) -> Result<()> {
    let snapshot = coordinator.snapshot();

    println!();
    println!("{}: {}", select.label().bold(), select.input_value());
    if snapshot.is_loading_employees {
        println!("{}", "Loading employees...".dimmed());
    }
    if snapshot.is_loading_transactions {
        println!("{}", "Loading transactions...".dimmed());
    }

    if snapshot.transactions.is_some() {
        println!("{}", TransactionListing::from(&snapshot).format(format)?);
    }

    let stats = coordinator.cache().stats();
    println!(
        "{}",
        format!(
            "{} cached responses ({} bytes)",
            stats.total_entries, stats.total_size_bytes
        )
        .dimmed()
    );
    Ok(())
}

/// Print the outcome of every background load that has completed.
async fn report_finished(pending: &mut Vec<JoinHandle<Result<()>>>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        pending.drain(..).partition(|handle| handle.is_finished());
    *pending = running;

    for handle in finished {
        report(handle.await);
    }
}

async fn wait_all(pending: &mut Vec<JoinHandle<Result<()>>>) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Loading...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    for handle in pending.drain(..) {
        let outcome = handle.await;
        spinner.suspend(|| report(outcome));
    }
    spinner.finish_and_clear();
}

fn report(outcome: std::result::Result<Result<()>, tokio::task::JoinError>) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(err)) => eprintln!("{} {}", "Error:".red(), err),
        Err(err) if err.is_cancelled() => {}
        Err(err) => eprintln!("{} background load failed: {}", "Error:".red(), err),
    }
}

/// Run a blocking dialoguer select off the async workers.
async fn prompt_select(prompt: &str, items: Vec<String>, default: usize) -> Result<Option<usize>> {
    let prompt = prompt.to_string();
    tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&items)
            .default(default)
            .interact_opt()
    })
    .await
    .map_err(|e| Error::Other(format!("Prompt task failed: {}", e)))?
    .map_err(Error::from)
}
