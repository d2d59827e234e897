//! Revision and build time stamped in by `build.rs`.

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_COMMIT: &str = env!("SHELLIDE_BUILD_GIT_HASH");
pub const BUILD_TIMESTAMP: &str = env!("SHELLIDE_BUILD_TIMESTAMP");

/// `--help` trailer: the environment the pane reads, then the build stamp.
pub const HELP_FOOTER: &str = concat!(
    "Environment:\n",
    "  SHELLIDE_BASE_URL      backend base URL\n",
    "  SHELLIDE_AUTH_TOKEN    bearer token for /api/terminal/execute\n",
    "  SHELLIDE_PROJECT_ID    project to attach to\n",
    "  SHELLIDE_TIMEOUT_SECS  request timeout\n",
    "  SHELLIDE_LOG           tracing filter directive\n",
    "\nBuild: ",
    env!("SHELLIDE_BUILD_GIT_HASH"),
    " @ ",
    env!("SHELLIDE_BUILD_TIMESTAMP")
);

/// Muted line under the pane banner.
pub fn startup_metadata_line() -> String {
    format!("shellide v{VERSION} · {GIT_COMMIT} · {BUILD_TIMESTAMP}")
}

pub fn cli_version_text() -> String {
    format!("shellide {VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}
