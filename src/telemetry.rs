// ABOUTME: Diagnostic logging setup — tracing to stderr, filtered by WSD_LOG.
// ABOUTME: stdout stays reserved for the JSON result.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directive, e.g. `WSD_LOG=debug`.
pub const LOG_ENV: &str = "WSD_LOG";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
