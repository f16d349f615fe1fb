use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Install the stderr log subscriber.
/// - Respects `RUST_LOG` if set
/// - Otherwise `warn`, or `debug` for the salon crates with `--verbose`
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,salon=debug,salon_core=debug"
    } else {
        "warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Only fails when a global subscriber is already set, e.g. under tests.
    if let Err(e) = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stderr)
        .try_init()
    {
        tracing::debug!(error = %e, "log subscriber already installed");
    }
}
