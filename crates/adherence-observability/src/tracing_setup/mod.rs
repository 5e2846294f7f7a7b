//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use adherence_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "ADHERENCE_LOG";

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `ADHERENCE_LOG` environment variable for filtering.
/// Defaults to `info` level if not set. A second call is a no-op.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init();
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init();
}

/// Initialize tracing from the engine configuration.
///
/// `ADHERENCE_LOG` still wins over the configured level when set.
pub fn init_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let _ = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
