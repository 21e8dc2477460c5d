//! Logging utilities for CPLB components.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize tracing with an explicit fallback level.
///
/// RUST_LOG still wins when it is set. Logs go to stderr so that command
/// output on stdout stays machine readable.
pub fn init_with_level(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
