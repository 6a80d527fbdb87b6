//! Tracing subscriber setup.
//!
//! Events go to stderr so they never interleave with generated code written
//! to stdout. `RUST_LOG` overrides the default level.
use tracing_subscriber::EnvFilter;

/// Install the global subscriber: `warn` by default, `debug` when asked.
///
/// A subscriber installed earlier (e.g. by a test harness) is left alone.
pub fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
