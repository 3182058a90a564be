//! Tracing setup for the binaries.

use tracing_subscriber::EnvFilter;

/// Default directives when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,kasir=debug,sqlx=warn";

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages everywhere
/// - `RUST_LOG=kasir=trace` - Trace the kasir crates only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Logs go to stderr so stdout stays clean for JSON output. Calling this
/// twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
