//! # Structured Logging
//!
//! Subscriber setup and span helpers on top of the tracing ecosystem.
//!
//! Log output goes to stderr so reports printed on stdout stay machine
//! readable. `RUST_LOG`, when set, takes precedence over the configured
//! level.

use crate::config::{ObservabilityConfig, Settings};
use crate::errors::{GwValidateError, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Create a tracing span for checking one document.
///
/// ```rust,ignore
/// let span = document_span!("routes.yaml", "HTTPRoute/web");
/// ```
#[macro_export]
macro_rules! document_span {
    ($source:expr, $document:expr) => {
        tracing::debug_span!(
            "check_document",
            source = %$source,
            document = %$document,
            violations = tracing::field::Empty
        )
    };
    ($source:expr, $document:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "check_document",
            source = %$source,
            document = %$document,
            violations = tracing::field::Empty,
            $($field)*
        )
    };
}

/// Build the level filter: `RUST_LOG` if set, the configured level otherwise.
pub fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.log_level).map_err(|e| {
        GwValidateError::config_with_source(
            format!("Invalid log level '{}'", config.log_level),
            Box::new(e),
        )
    })
}

/// Install the global subscriber.
///
/// A subscriber installed earlier (e.g. by a test harness) is left in place.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(build_filter(config)?)
        .with_writer(std::io::stderr);

    let installed = if config.json_logging {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    if installed.is_err() {
        // Subscriber already set elsewhere; ignore.
    }
    Ok(())
}

/// Log settings at startup
pub fn log_settings_info(settings: &Settings) {
    tracing::debug!(
        log_level = %settings.observability.log_level,
        json_logging = %settings.observability.json_logging,
        default_namespace = %settings.check.default_namespace,
        output = %settings.check.output,
        "gwvalidate settings"
    );
}
