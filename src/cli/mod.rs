//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod browse;
pub mod context;
pub mod employees;
pub mod transactions;

pub use args::OutputFormat;
pub use context::CommandContext;

/// txfeed - browse employee transactions with cached, paginated loading
#[derive(Parser, Debug)]
#[command(name = "txfeed")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "TXFEED_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "TXFEED_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Backend base URL (e.g. http://localhost:3001)
    #[arg(long, global = true, env = "TXFEED_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "TXFEED_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Disable the response cache, fetch fresh data on every request
    #[arg(long, global = true, env = "TXFEED_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List employees
    Employees,

    /// Show transactions, all or for one employee
    Transactions {
        /// Only show transactions of this employee ID
        #[arg(long, short = 'e', conflicts_with = "pages")]
        employee: Option<String>,

        /// Number of pages to load
        #[arg(long, short = 'p', default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,
    },

    /// Interactively browse transactions with an employee filter
    Browse,

    /// Display version information
    Version,
}
