//! Boot — logging init, config load, state creation.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::conf::{BrewlogConfig, LogFormat, LogOutput};
use crate::state::AppState;

/// Load and validate config, switch tracing to the configured subscriber,
/// and build the shared state.
pub fn boot() -> Result<AppState> {
    // Phase 1: thread-local subscriber so config loading can log
    let basic_tracing = init_tracing_basic();

    info!("Starting brewlog v{}", env!("CARGO_PKG_VERSION"));

    let config = BrewlogConfig::load()
        .context("Failed to load configuration")?;

    config.validate()
        .context("Configuration validation failed")?;

    // Phase 2: free the default slot before installing the global subscriber
    drop(basic_tracing);
    init_tracing_from_config(&config)?;

    info!("Configuration loaded successfully");
    info!("Log directory: {}", config.logs.directory);

    Ok(AppState::new(config))
}

/// Phase 1: Basic tracing init so we can log during config loading.
/// Uses RUST_LOG env var or a sensible default.
fn init_tracing_basic() -> tracing::subscriber::DefaultGuard {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brewlog=debug"));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_default(subscriber)
}

/// Phase 2: Install the global subscriber described by the config.
fn init_tracing_from_config(config: &BrewlogConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Prefer RUST_LOG env var, fall back to config level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let file = match &config.logging.output {
        LogOutput::Stdout => None,
        LogOutput::File { path } => Some(Arc::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file '{}'", path))?,
        )),
    };

    match (&config.logging.format, file) {
        (LogFormat::Json, None) => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Json, Some(file)) => {
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_ansi(false)
                .with_writer(file);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, None) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        (LogFormat::Pretty, Some(file)) => {
            let layer = fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_ansi(false)
                .with_writer(file);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }

    Ok(())
}
