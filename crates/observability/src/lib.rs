//! # Observability
//!
//! Tracing initialisation for binaries and integration tests.
//!
//! The command bus reports through its subscribed sinks and through the
//! `tracing`/`metrics` facades; this crate wires up a `tracing-subscriber`
//! so those diagnostics become visible.
//!
//! ## Usage
//!
//! ```ignore
//! observability::init()?;
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// Human readable, multi-line
    #[default]
    Pretty,
    /// Single line per event
    Compact,
    /// JSON structured logs
    Json,
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log format
    pub log_format: LogFormat,
    /// Fallback filter directive when RUST_LOG is unset
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            default_log_level: "info".to_string(),
        }
    }
}

/// Initialise tracing with the default configuration
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Initialise tracing with a custom configuration
///
/// Honours the RUST_LOG environment variable when set.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    }
    .context("failed to initialize tracing subscriber")?;

    tracing::debug!(log_format = ?config.log_format, "observability initialized");
    Ok(())
}
