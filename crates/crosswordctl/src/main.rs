//! crosswordctl - play clues and manage progress from the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crosswordctl::{commands, load_config, AppContext, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{}", commands::error_line(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.store)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!("crosswordctl v{} using {} store", env!("CARGO_PKG_VERSION"), config.storage.backend);

    let store = config
        .open_store()
        .await
        .context("Failed to open progress store")?;
    let ctx = AppContext::open(store).await?;

    commands::run(&ctx, cli.command).await
}
