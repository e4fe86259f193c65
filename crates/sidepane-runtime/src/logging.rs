#![forbid(unsafe_code)]

//! Tracing subscriber setup for binaries.
//!
//! Library code only emits events (targets `sidepane.layout`,
//! `sidepane.storage`, `sidepane.web`); installing a subscriber is left to
//! the process entry point.
//!
//! ## Environment Variables
//!
//! 1. **`SIDEPANE_LOG`** (highest priority) - a bare level such as `debug`
//!    applies to the sidepane targets only; anything with `=` or `,` is used
//!    as a full filter.
//! 2. **`RUST_LOG`** - standard filter syntax.
//! 3. **Default** - `warn` globally, `info` for sidepane.

use std::env;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Output format for [`init`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Install a global subscriber writing to stderr.
///
/// Fails if a global subscriber is already installed or the filter from the
/// environment does not parse.
pub fn init(format: LogFormat) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = create_filter()?;
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}

fn create_filter() -> Result<EnvFilter, Box<dyn std::error::Error + Send + Sync>> {
    if let Ok(value) = env::var("SIDEPANE_LOG") {
        return Ok(expand_sidepane_log(&value)?);
    }
    if let Ok(value) = env::var("RUST_LOG") {
        return Ok(EnvFilter::try_new(value)?);
    }
    Ok(EnvFilter::try_new("warn,sidepane=info")?)
}

fn expand_sidepane_log(value: &str) -> Result<EnvFilter, tracing_subscriber::filter::ParseError> {
    if value.contains('=') || value.contains(',') {
        return EnvFilter::try_new(value);
    }
    EnvFilter::try_new(format!("warn,sidepane={value}"))
}
