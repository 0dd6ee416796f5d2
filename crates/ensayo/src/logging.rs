//! Log subscriber setup for test runs.
//!
//! The generator itself only emits `tracing` events; a test binary calls
//! [`init_logging`] once to see them.

use crate::result::{EnsayoError, EnsayoResult};
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Filter used when neither the config nor `RUST_LOG` sets one
pub const DEFAULT_FILTER: &str = "warn,ensayo=info";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored
    Pretty,
    /// Single line per event
    Compact,
    /// One JSON object per event, for CI log collectors
    Json,
}

#[allow(clippy::derivable_impls)]
impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        {
            Self::Compact
        }
        #[cfg(not(debug_assertions))]
        {
            Self::Json
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directives, e.g. `"info,ensayo=trace"`
    pub filter: Option<String>,
    /// Include file and line of each event
    pub include_location: bool,
    /// Log span open and close, which shows the recursion of each `generate`
    pub log_spans: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: None,
            include_location: false,
            log_spans: false,
        }
    }
}

impl LogConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set output format
    #[must_use]
    pub const fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set filter directives
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Log span open and close events
    #[must_use]
    pub const fn with_spans(mut self, log_spans: bool) -> Self {
        self.log_spans = log_spans;
        self
    }

    fn env_filter(&self) -> EnsayoResult<EnvFilter> {
        match &self.filter {
            Some(filter) => EnvFilter::try_new(filter).map_err(|e| EnsayoError::Logging {
                message: format!("invalid filter {filter:?}: {e}"),
            }),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
        }
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`EnsayoError::Logging`] if the filter does not parse or a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> EnsayoResult<()> {
    let env_filter = config.env_filter()?;

    let span_events = if config.log_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(span_events);

    let installed = match config.format {
        LogFormat::Pretty => subscriber.pretty().try_init(),
        LogFormat::Compact => subscriber.compact().try_init(),
        LogFormat::Json => subscriber.json().try_init(),
    };
    installed.map_err(|e| EnsayoError::Logging {
        message: e.to_string(),
    })?;

    tracing::debug!(format = ?config.format, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        let format: LogFormat = serde_yaml_ng::from_str("json").unwrap_or(LogFormat::Pretty);
        assert_eq!(format, LogFormat::Json);
    }

    #[test]
    fn test_builders() {
        let config = LogConfig::new()
            .with_format(LogFormat::Pretty)
            .with_filter("ensayo=trace")
            .with_spans(true);
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.filter.as_deref(), Some("ensayo=trace"));
        assert!(config.log_spans);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let config = LogConfig::new().with_filter("ensayo=verbose");
        assert!(matches!(
            init_logging(&config),
            Err(EnsayoError::Logging { .. })
        ));
    }

    #[test]
    fn test_second_init_fails() {
        let config = LogConfig::new().with_filter("off");
        let _ = init_logging(&config);
        assert!(matches!(
            init_logging(&config),
            Err(EnsayoError::Logging { .. })
        ));
    }
}
