//! Logging setup shared by the Sparks binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the calling package, the binary and the shared crate.
/// `RUST_LOG` overrides it entirely.
///
/// # Arguments
///
/// * `package_name` - The calling package (`env!("CARGO_PKG_NAME")`)
/// * `binary_name` - The name of the binary (`env!("CARGO_BIN_NAME")`)
/// * `default_log_level` - e.g. "debug", "info", "warn"
///
/// # Examples
///
/// ```no_run
/// use sparks_shared::logger::setup_logger;
///
/// setup_logger("sparks-server", "sparks-server", "debug");
/// ```
pub fn setup_logger(package_name: &str, binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                default_filter(package_name, binary_name, default_log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(package_name: &str, binary_name: &str, level: &str) -> String {
    format!(
        "{}={level},{}={level},sparks_shared={level},tower_http=info",
        package_name.replace('-', "_"),
        binary_name.replace('-', "_"),
    )
}
