//! Logging initialization
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `MONITOR_SELECT_LOG` environment variable, falling back to `info`.
//!
//! ```bash
//! MONITOR_SELECT_LOG=debug monitor-select
//! MONITOR_SELECT_LOG=monitor_select::rdp=debug,warn monitor-select
//! ```

use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Environment variable holding filter directives
pub const LOG_ENV_VAR: &str = "MONITOR_SELECT_LOG";

/// Builds the filter from the environment, defaulting to `info`
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(LOG_ENV_VAR).ok().as_deref())
}

/// Blank or unparsable directives fall back to the default level
fn filter_from(directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => EnvFilter::try_new(value).unwrap_or_else(|err| {
            eprintln!("Ignoring {}={:?}: {}", LOG_ENV_VAR, value, err);
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::new(DEFAULT_FILTER),
    }
}

/// Installs the global subscriber writing to stderr
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
