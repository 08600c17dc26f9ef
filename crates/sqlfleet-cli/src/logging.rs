//! Log output for the sqlfleet binary
//!
//! Human-readable logs go to stderr so command output on stdout stays
//! machine-readable. With a log directory set, JSON lines are also written to
//! a daily-rolling file.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "sqlfleet.log";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory for JSON log files; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    pub enable_console_logs: bool,
    /// Add file and line to console lines
    pub include_location: bool,
    /// Log span creation and close with their durations
    pub enable_spans: bool,
    /// Used when RUST_LOG is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_verbosity(0)
    }
}

impl LoggingConfig {
    /// Configuration for `-v` given `verbosity` times
    pub fn for_verbosity(verbosity: u8) -> Self {
        let default_filter = match verbosity {
            0 => "warn",
            1 => "warn,sqlfleet_cli=info,sqlfleet_monitor=info,sqlfleet_connection=info",
            2 => "info,sqlfleet_cli=debug,sqlfleet_monitor=debug,sqlfleet_connection=debug,sqlfleet_driver_mysql=debug",
            _ => "debug",
        };
        Self {
            log_dir: None,
            enable_console_logs: true,
            include_location: verbosity >= 3,
            enable_spans: verbosity >= 3,
            default_filter: default_filter.to_string(),
        }
    }

    pub fn with_log_dir(mut self, dir: PathBuf) -> Self {
        self.log_dir = Some(dir);
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }

    // NEW rather than ENTER: async spans are re-entered on every poll.
    fn span_events(&self) -> FmtSpan {
        if self.enable_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Default directory for JSON log files
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sqlfleet")
        .join("logs")
}

fn console_layer(config: &LoggingConfig) -> BoxedLayer {
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location)
        .with_span_events(config.span_events())
        .compact()
        .with_filter(config.filter())
        .boxed()
}

fn file_layer(config: &LoggingConfig, dir: &Path) -> anyhow::Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX));

    let layer = fmt::layer()
        .json()
        .with_writer(writer)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(config.span_events())
        .with_filter(config.filter())
        .boxed();
    Ok((layer, guard))
}

/// Install the global subscriber.
///
/// Keep the returned guard alive until exit; dropping it flushes the file
/// writer.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let mut layers = Vec::new();
    if config.enable_console_logs {
        layers.push(console_layer(&config));
    }

    let guard = match &config.log_dir {
        Some(dir) => {
            let (layer, guard) = file_layer(&config, dir)?;
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).try_init()?;
    tracing::debug!(log_dir = ?config.log_dir, filter = %config.default_filter, "logging initialized");
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let config = LoggingConfig::default();
        assert!(config.enable_console_logs);
        assert!(config.log_dir.is_none());
        assert!(!config.enable_spans);
        assert_eq!(config.default_filter, "warn");
    }

    #[test]
    fn test_verbosity_levels() {
        assert!(
            LoggingConfig::for_verbosity(1)
                .default_filter
                .contains("sqlfleet_monitor=info")
        );
        assert!(
            LoggingConfig::for_verbosity(2)
                .default_filter
                .contains("sqlfleet_driver_mysql=debug")
        );
        let trace = LoggingConfig::for_verbosity(5);
        assert_eq!(trace.default_filter, "debug");
        assert!(trace.enable_spans);
        assert!(trace.include_location);
    }

    #[test]
    fn test_with_log_dir() {
        let config = LoggingConfig::default().with_log_dir(PathBuf::from("/tmp/logs"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
    }

    #[test]
    fn test_log_directory() {
        assert!(log_directory().ends_with("sqlfleet/logs"));
    }
}
