//! Diagnostic logging setup
//!
//! Diagnostics go to stderr through `tracing`; the run summary stays on stdout.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "bulk_import=debug"
    } else {
        "bulk_import=info"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
