//! Tracing setup for the `pico` binary.

use tracing_subscriber::EnvFilter;

/// The filter to use when `RUST_LOG` is unset.
pub fn default_directive(level: &str, verbose: bool) -> String {
    if verbose {
        "debug".to_string()
    } else {
        level.to_string()
    }
}

/// Install the global subscriber. Logs go to stderr so command output
/// stays clean on stdout.
pub fn init_logging(level: &str, verbose: bool) {
    let directive = default_directive(level, verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}
