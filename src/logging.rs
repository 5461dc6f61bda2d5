//! Tracing subscriber setup
//!
//! Log lines go to stderr so they never interleave with chat output on
//! stdout. An optional file receives a copy of every event.

use crate::config::LoggingConfig;
use anyhow::Result;
use std::fs::OpenOptions;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the event filter: `RUST_LOG` wins over the configured level
///
/// # Errors
///
/// Returns error if the configured level is not a valid filter directive
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;
    Ok(filter)
}

/// Subscriber for events raised before [`init_logging`] runs
///
/// Writes human-readable lines to stderr, filtered by `RUST_LOG` or
/// `edcare=warn`. Used as a scoped default while the configuration loads.
pub fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("edcare=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
}

/// Installs the global tracing subscriber
///
/// # Arguments
///
/// * `config` - Level, output format and optional log file
///
/// # Errors
///
/// Returns error if the filter is invalid, the log file cannot be opened,
/// or a subscriber is already installed
///
/// # Examples
///
/// ```no_run
/// use edcare::config::LoggingConfig;
/// use edcare::logging::init_logging;
///
/// let config = LoggingConfig {
///     level: "edcare=info".to_string(),
///     json_format: false,
///     file_path: None,
/// };
/// init_logging(&config).unwrap();
/// ```
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let registry = tracing_subscriber::registry().with(build_filter(config)?);

    let file = match &config.file_path {
        Some(path) => Some(Arc::new(
            OpenOptions::new().create(true).append(true).open(path)?,
        )),
        None => None,
    };

    if config.json_format {
        let stderr_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr);

        let file_layer = file.map(|file| {
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(file)
        });

        registry.with(stderr_layer).with(file_layer).try_init()?;
    } else {
        let stderr_layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);

        let file_layer = file.map(|file| {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .with_writer(file)
        });

        registry.with(stderr_layer).with(file_layer).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn config(level: &str) -> LoggingConfig {
        LoggingConfig {
            level: level.to_string(),
            json_format: false,
            file_path: None,
        }
    }

    #[test]
    #[serial]
    fn test_build_filter_uses_configured_level() {
        std::env::remove_var("RUST_LOG");
        let filter = build_filter(&config("edcare=debug")).unwrap();
        assert_eq!(filter.to_string(), "edcare=debug");
    }

    #[test]
    #[serial]
    fn test_build_filter_prefers_rust_log() {
        std::env::set_var("RUST_LOG", "edcare=trace");
        let filter = build_filter(&config("edcare=warn")).unwrap();
        std::env::remove_var("RUST_LOG");
        assert_eq!(filter.to_string(), "edcare=trace");
    }

    #[test]
    #[serial]
    fn test_build_filter_rejects_garbage_level() {
        std::env::remove_var("RUST_LOG");
        assert!(build_filter(&config("edcare=loudest")).is_err());
    }

    #[test]
    fn test_init_logging_fails_on_unwritable_file() {
        let config = LoggingConfig {
            file_path: Some("/nonexistent/dir/edcare.log".to_string()),
            ..config("edcare=info")
        };
        assert!(init_logging(&config).is_err());
    }
}
