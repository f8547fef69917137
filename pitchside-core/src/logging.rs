//! Logging bootstrap
//!
//! Structured logging via tracing with an env-driven filter.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter used when RUST_LOG is not set
const DEFAULT_FILTER: &str = "pitchside_web=debug,pitchside_core=debug,tower_http=debug";

/// Initialize the logging system.
///
/// Honors `RUST_LOG` when present, otherwise falls back to a
/// development-friendly default. Safe to call once per process.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}
