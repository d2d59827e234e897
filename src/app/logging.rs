//! Diagnostic logging setup.
//!
//! The pane owns the tty in raw mode, so logs default to off and are best
//! pointed at a file.

use shellide::config::LoggingConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Env var whose directive wins over `[logging] filter`.
pub(crate) const LOG_ENV: &str = "SHELLIDE_LOG";
const DEFAULT_FILTER: &str = "off";

/// Install the global subscriber.
pub(crate) fn init_logging(config: &LoggingConfig) -> Result<(), String> {
    let directive = filter_directive(std::env::var(LOG_ENV).ok(), config.filter.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| format!("invalid log filter `{directive}`: {e}"))?;

    let installed = match config.file.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("failed to open log file `{path}`: {e}"))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    installed.map_err(|e| format!("failed to install logger: {e}"))
}

/// Pick the filter directive: env, then config, then off.
fn filter_directive(env_value: Option<String>, configured: Option<&str>) -> String {
    env_value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            configured
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}
