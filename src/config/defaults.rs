//! Default configuration constants and the shipped config template.

/// Annotated default `shellide.toml`, printed by `--print-config`.
pub(super) const DEFAULT_SHELLIDE_CONFIG_TEMPLATE: &str = include_str!("../templates/shellide.toml");
/// Backend the executor talks to when nothing else is configured.
pub(super) const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Per-request timeout; a little above the backend's own 300 s command limit.
pub(super) const DEFAULT_TIMEOUT_SECS: u64 = 310;
pub(super) const DEFAULT_PROMPT_SYMBOL: &str = "$";
pub(super) const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Commands bound to F1..F4 out of the box.
pub(super) fn default_quick_commands() -> Vec<String> {
    ["ls -la", "pwd", "git status", "npm install"]
        .into_iter()
        .map(str::to_string)
        .collect()
}
