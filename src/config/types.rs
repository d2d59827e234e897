//! Configuration data model.
//!
//! Struct definitions plus default values. Loading and precedence live in
//! `config::mod`.

use serde::Deserialize;

use super::defaults::{
    default_quick_commands, DEFAULT_BASE_URL, DEFAULT_HISTORY_LIMIT, DEFAULT_PROMPT_SYMBOL,
    DEFAULT_TIMEOUT_SECS,
};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub project: ProjectConfig,
    pub terminal: TerminalConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Where commands are executed.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Literal bearer token. Mutually exclusive with `auth_token_env`.
    pub auth_token: String,
    /// Name of an env var holding the bearer token.
    pub auth_token_env: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_token: String::new(),
            auth_token_env: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Project the pane opens attached to. Without an `id` the pane is unattached.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    pub id: Option<String>,
    pub name: Option<String>,
    pub directory: Option<String>,
}

/// Line-editor behavior.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalConfig {
    pub prompt_symbol: String,
    pub history_limit: usize,
    pub banner: bool,
    /// Tab-completion candidates; empty means the built-in list.
    pub completions: Vec<String>,
    /// Commands bound to F1..F4, in order.
    pub quick_commands: Vec<String>,
    /// Starting working directory, overriding the project directory.
    pub working_directory: Option<String>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            prompt_symbol: DEFAULT_PROMPT_SYMBOL.to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            banner: true,
            completions: Vec::new(),
            quick_commands: default_quick_commands(),
            working_directory: None,
        }
    }
}

/// Display / rendering preferences.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Diagnostic logging. Off unless a filter is given.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing-subscriber` env-filter directive, e.g. `shellide=debug`.
    pub filter: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<String>,
}
