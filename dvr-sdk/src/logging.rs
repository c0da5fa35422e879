//! Logging setup for applications built on the SDK
//!
//! Every crate in the workspace logs through `tracing`; nothing is printed
//! until an application installs a subscriber. Front-ends that own the
//! terminal should stay in [`LoggingMode::Silent`].
//!
//! Without an explicit filter only the SDK's own crates log at the mode's
//! level; the HTTP stack underneath (reqwest, ureq, hyper) stays at `warn`.

use std::str::FromStr;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

/// Selects the [`LoggingMode`] in [`init_logging_from_env`]
pub const LOG_MODE_VAR: &str = "DVR_LOG_MODE";

/// Filter directives overriding the mode's defaults; `RUST_LOG` is the fallback
pub const LOG_FILTER_VAR: &str = "DVR_LOG_LEVEL";

const SDK_TARGETS: [&str; 5] = ["dvr_sdk", "dvr_api", "dvr_discovery", "dvr_parser", "soap_client"];

/// Where and how log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggingMode {
    /// No subscriber at all
    #[default]
    Silent,
    /// One compact stderr line per event, SDK crates at `info`
    Development,
    /// Multi-line stderr output with source locations, SDK crates at `debug`
    Debug,
    /// Newline-delimited JSON on stderr, for log collectors
    Json,
}

impl LoggingMode {
    fn sdk_level(self) -> Option<&'static str> {
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Development | LoggingMode::Json => Some("info"),
            LoggingMode::Debug => Some("debug"),
        }
    }

    /// Filter used when neither [`LOG_FILTER_VAR`] nor `RUST_LOG` is set
    pub fn default_directives(self) -> String {
        match self.sdk_level() {
            None => "off".to_string(),
            Some(level) => std::iter::once("warn".to_string())
                .chain(SDK_TARGETS.iter().map(|target| format!("{}={}", target, level)))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn format_layer(self) -> Option<Box<dyn Layer<Registry> + Send + Sync>> {
        let base = fmt::layer().with_writer(std::io::stderr);
        match self {
            LoggingMode::Silent => None,
            LoggingMode::Development => Some(base.compact().with_target(false).boxed()),
            LoggingMode::Debug => Some(
                base.pretty()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .boxed(),
            ),
            LoggingMode::Json => Some(base.json().with_current_span(false).boxed()),
        }
    }
}

impl FromStr for LoggingMode {
    type Err = LoggingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "off" | "silent" => Ok(LoggingMode::Silent),
            "dev" | "development" => Ok(LoggingMode::Development),
            "debug" => Ok(LoggingMode::Debug),
            "json" => Ok(LoggingMode::Json),
            other => Err(LoggingError::UnknownMode(other.to_string())),
        }
    }
}

/// Logging configuration error
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("Unknown logging mode '{0}' (expected silent, development, debug or json)")]
    UnknownMode(String),
}

/// Install the global subscriber for `mode`
///
/// Call once, early, before any session is created. A second call fails
/// with [`LoggingError::TracingInit`].
pub fn init_logging(mode: LoggingMode) -> Result<(), LoggingError> {
    let Some(layer) = mode.format_layer() else {
        return Ok(());
    };
    let filter = filter_for(mode)?;

    Registry::default()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| LoggingError::TracingInit(e.to_string()))
}

/// Initialize logging from [`LOG_MODE_VAR`]; unset means silent
pub fn init_logging_from_env() -> Result<(), LoggingError> {
    let mode = match std::env::var(LOG_MODE_VAR) {
        Ok(value) => value.parse()?,
        Err(_) => LoggingMode::Silent,
    };
    init_logging(mode)
}

fn filter_for(mode: LoggingMode) -> Result<EnvFilter, LoggingError> {
    let directives = std::env::var(LOG_FILTER_VAR)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| mode.default_directives());

    parse_filter(&directives)
}

fn parse_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|_| LoggingError::InvalidFilter(directives.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", LoggingMode::Silent)]
    #[case("off", LoggingMode::Silent)]
    #[case(" Development ", LoggingMode::Development)]
    #[case("dev", LoggingMode::Development)]
    #[case("DEBUG", LoggingMode::Debug)]
    #[case("json", LoggingMode::Json)]
    fn test_mode_names(#[case] value: &str, #[case] expected: LoggingMode) {
        assert_eq!(value.parse::<LoggingMode>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        assert!(matches!(
            "verbose".parse::<LoggingMode>(),
            Err(LoggingError::UnknownMode(mode)) if mode == "verbose"
        ));
    }

    #[test]
    fn test_default_directives_scope_sdk_crates() {
        assert_eq!(LoggingMode::Silent.default_directives(), "off");
        assert_eq!(
            LoggingMode::Debug.default_directives(),
            "warn,dvr_sdk=debug,dvr_api=debug,dvr_discovery=debug,dvr_parser=debug,soap_client=debug"
        );
        assert!(LoggingMode::Json.default_directives().contains("dvr_discovery=info"));
    }

    #[rstest]
    #[case(LoggingMode::Silent)]
    #[case(LoggingMode::Development)]
    #[case(LoggingMode::Debug)]
    #[case(LoggingMode::Json)]
    fn test_default_directives_parse(#[case] mode: LoggingMode) {
        assert!(parse_filter(&mode.default_directives()).is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        assert!(matches!(
            parse_filter("dvr_api=notalevel"),
            Err(LoggingError::InvalidFilter(_))
        ));
    }

    #[test]
    fn test_silent_installs_nothing() {
        assert!(init_logging(LoggingMode::Silent).is_ok());
        assert!(!tracing::dispatcher::has_been_set());
    }
}
