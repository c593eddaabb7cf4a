//! Logging setup for the `cryo` tools.
//!
//! Log level comes from `RUST_LOG`, defaulting to `info`. Output goes to
//! stderr so generated report text on stdout stays clean.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LEVEL: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialize human-readable log output.
///
/// # Example
/// ```no_run
/// cryo_core::logging::init();
/// tracing::info!("Checking fill line");
/// ```
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Initialize JSON log output, one object per line.
pub fn init_json() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
        .init();
}
