//! # catalog-telemetry
//!
//! Installs the process-wide `tracing` subscriber.
//!
//! Logs go to stderr so that an interactive console on stdout stays clean.
//! The filter comes from `RUST_LOG` and defaults to `info`.
//!
//! ```rust,ignore
//! catalog_telemetry::init_telemetry(LogFormat::Pretty, "catalog")?;
//! tracing::info!("ready");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, one line per event.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected 'pretty' or 'json')")),
        }
    }
}

/// Error returned when the global subscriber cannot be installed.
#[derive(Debug, Error)]
#[error("failed to initialize telemetry: {0}")]
pub struct TelemetryError(String);

/// Build the filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber.
///
/// Idempotent: if a global subscriber is already installed, it is kept and
/// this returns `Ok(())`.
///
/// # Errors
///
/// Returns [`TelemetryError`] if installing the subscriber fails.
pub fn init_telemetry(format: LogFormat, service_name: &str) -> Result<(), TelemetryError> {
    if tracing::dispatcher::has_been_set() {
        tracing::debug!(service = service_name, "subscriber already installed");
        return Ok(());
    }

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };
    result.map_err(|e| TelemetryError(e.to_string()))?;

    tracing::debug!(service = service_name, ?format, "telemetry initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_formats() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn repeated_init_keeps_the_first_subscriber() {
        init_telemetry(LogFormat::Pretty, "test").unwrap();
        init_telemetry(LogFormat::Json, "test").unwrap();
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn error_message_names_telemetry() {
        let err = TelemetryError("already set".into());
        assert_eq!(err.to_string(), "failed to initialize telemetry: already set");
    }
}
