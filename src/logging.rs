//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "schema_erd=warn";
const VERBOSE_FILTER: &str = "schema_erd=debug";

/// Install a stderr subscriber. `--verbose` wins over `RUST_LOG`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    // stdout carries the diagram, so diagnostics stay on stderr
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
