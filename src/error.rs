//! Unified error types for the terminal front end.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// ExecuteError
// ---------------------------------------------------------------------------

/// Transport-level failures of a remote command execution.
///
/// A command that ran and exited non-zero is *not* an error; it comes back as
/// a normal result with its exit code.
#[derive(Debug)]
pub enum ExecuteError {
    /// Network / reqwest-level error, including response decoding.
    Http(reqwest::Error),
    /// Non-2xx status from the backend, with its `detail` message when present.
    Status { code: u16, detail: String },
    /// The backend answered but flagged the request itself as failed.
    Rejected(String),
}

impl ExecuteError {
    /// HTTP status code, when the backend produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Rejected(_) => None,
        }
    }
}

impl fmt::Display for ExecuteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) if e.is_timeout() => write!(f, "request timed out"),
            Self::Http(e) => write!(f, "request failed: {e}"),
            Self::Status { code, detail } if detail.is_empty() => {
                write!(f, "command execution failed (status {code})")
            }
            Self::Status { code, detail } => write!(f, "{detail} (status {code})"),
            Self::Rejected(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ExecuteError {}

impl From<reqwest::Error> for ExecuteError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}
