use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "sprintdesk=info,tower_http=info";

/// Log to stderr. Used by the gateway.
pub fn init_stderr() -> Result<()> {
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

/// Log to a file. Used by the dashboard, which owns the terminal.
pub fn init_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    let fmt_layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
    tracing_subscriber::registry()
        .with(env_filter()?)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}

fn env_filter() -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Invalid log filter")
}
