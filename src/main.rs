//! txfeed - browse employee transactions with cached, paginated loading

use clap::Parser;

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod feeds;
mod models;
mod output;
mod view;

use cli::args::GlobalOptions;
use cli::{Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Employees => cli::employees::list(&opts).await,
        Commands::Transactions { employee, pages } => {
            cli::transactions::list(&opts, employee.as_deref(), pages).await
        }
        Commands::Browse => cli::browse::run(&opts).await,
        Commands::Version => {
            println!("txfeed version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG`, defaulting to warn.
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}
