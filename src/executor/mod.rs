//! Remote command execution contract.
//!
//! The terminal never runs processes itself. It hands a command line, the
//! cached working directory and the active project to a [`CommandExecutor`]
//! and renders whatever comes back.

mod http;

use crate::error::ExecuteError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpExecutor;

/// One command submitted for execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExecuteRequest {
    pub command: String,
    /// Cached cwd from the session; empty lets the backend choose.
    #[serde(rename = "working_directory")]
    pub cwd: String,
    pub project_id: Option<String>,
}

/// Structured result of a completed execution.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExecuteResult {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default, alias = "output")]
    pub stdout: String,
    #[serde(default, alias = "error")]
    pub stderr: String,
    #[serde(default)]
    pub exit_code: Option<i32>,
    #[serde(default, rename = "execution_time", alias = "duration_ms")]
    pub duration_ms: u64,
    #[serde(default, rename = "working_directory", alias = "new_cwd")]
    pub new_cwd: Option<String>,
}

fn default_success() -> bool {
    true
}

impl Default for ExecuteResult {
    fn default() -> Self {
        Self {
            success: true,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            duration_ms: 0,
            new_cwd: None,
        }
    }
}

impl ExecuteResult {
    /// Completed result with an exit code.
    pub fn exited(exit_code: i32, stdout: &str, stderr: &str, duration_ms: u64) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code: Some(exit_code),
            duration_ms,
            ..Self::default()
        }
    }

    pub fn with_new_cwd(mut self, cwd: &str) -> Self {
        self.new_cwd = Some(cwd.to_string());
        self
    }
}

/// Backend capable of running one command at a time for a session.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ExecuteError>;
}
