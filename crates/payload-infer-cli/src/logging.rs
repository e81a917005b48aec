//! Logging setup for the CLI.
//!
//! Log output goes to stderr so that stdout stays machine-readable.
//! `RUST_LOG` takes precedence over the `--verbose` flag.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
