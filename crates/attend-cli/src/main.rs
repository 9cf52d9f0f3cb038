use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use attend_cli::{Cli, Config, menu};
use attend_store::DocumentStore;

/// Load config and open the record store, ensuring the parent
/// directory exists. Failure here is fatal; everything after startup
/// is recovered at the menu.
fn open_store(config_path: Option<&Path>) -> Result<(DocumentStore, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.store_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create store directory")?;
    }

    let store = DocumentStore::open(&config.store_path)
        .with_context(|| format!("failed to open record store at {}", config.store_path.display()))?;
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let (mut store, config) = open_store(cli.config.as_deref())?;
    tracing::debug!(path = %config.store_path.display(), "record store ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())
}
