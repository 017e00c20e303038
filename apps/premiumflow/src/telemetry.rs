//! Tracing Setup
//!
//! Initializes the `tracing` subscriber from the logging section of the
//! configuration.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Filter directives; when unset, `premiumflow=<level>` is used
//! - `observability.logging.format`: `json`, `pretty` or `compact`
//! - `observability.logging.include_spans`: Span context in JSON output
//!
//! Logs are written to stderr so report output on stdout stays parseable.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Error returned when a global subscriber is already installed.
pub type TelemetryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filter directive used when `RUST_LOG` is not set.
#[must_use]
pub fn default_directive(level: &str) -> String {
    format!("premiumflow={}", level.to_ascii_lowercase())
}

/// Build the environment filter.
#[must_use]
pub fn env_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&logging.level)))
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), TelemetryError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(logging))
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder
            .json()
            .with_current_span(logging.include_spans)
            .with_span_list(logging.include_spans)
            .try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    }
}
