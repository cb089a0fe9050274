//! Diagnostic tracing, written to stderr.
//!
//! Status lines meant for the user go to stdout through `println!`; this
//! module only covers the `RUST_LOG`-controlled diagnostics.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`; when unset, defaults to `warn`, or `debug` with `verbose`.
///
/// # Example
/// ```bash
/// RUST_LOG=changelog_fragments=trace changelog-fragments generate
/// ```
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
