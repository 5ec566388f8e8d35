//! Tracing setup.
//!
//! Diagnostics go to stderr so stdout stays clean for identifiers and JSON.

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable consulted when `RUST_LOG` is unset.
pub const LOG_LEVEL_ENV: &str = "HAILSTONE_LOG_LEVEL";

/// Resolves the filter directive: `RUST_LOG`, then `HAILSTONE_LOG_LEVEL`,
/// then the configured level.
pub fn filter(configured: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_LEVEL_ENV))
        .unwrap_or_else(|_| EnvFilter::new(configured))
}

/// Installs the global subscriber.
pub fn init(configured: &str, json: bool) {
    let registry = tracing_subscriber::registry().with(filter(configured));

    // A second init (e.g. from tests) is not an error worth failing a command.
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr),
            )
            .try_init()
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "tracing already initialized");
    }
}
