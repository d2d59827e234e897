//! Shared test fixtures for session, executor and config test modules.

use crate::error::ExecuteError;
use crate::executor::{CommandExecutor, ExecuteRequest, ExecuteResult};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!("shellide-{prefix}-{millis}-{suffix}"));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Executor that replays queued outcomes and records every request.
///
/// An empty queue answers with a silent exit code 0.
#[derive(Default)]
pub struct ScriptedExecutor {
    outcomes: Mutex<VecDeque<Result<ExecuteResult, ExecuteError>>>,
    requests: Mutex<Vec<ExecuteRequest>>,
}

impl ScriptedExecutor {
    pub fn push_ok(&self, result: ExecuteResult) {
        self.outcomes.lock().unwrap().push_back(Ok(result));
    }

    pub fn push_err(&self, err: ExecuteError) {
        self.outcomes.lock().unwrap().push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ExecuteRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ExecuteError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ExecuteResult::exited(0, "", "", 0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert!(file.starts_with(fixture.path()));
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[tokio::test]
    async fn scripted_executor_replays_in_order_then_defaults() {
        let executor = ScriptedExecutor::default();
        executor.push_ok(ExecuteResult::exited(2, "", "bad", 1));
        executor.push_err(ExecuteError::Rejected("down".into()));

        let request = ExecuteRequest {
            command: "ls".into(),
            ..ExecuteRequest::default()
        };
        let first = executor.execute(&request).await.unwrap();
        assert_eq!(first.exit_code, Some(2));
        assert!(executor.execute(&request).await.is_err());
        let fallback = executor.execute(&request).await.unwrap();
        assert_eq!(fallback.exit_code, Some(0));

        assert_eq!(executor.call_count(), 3);
        assert_eq!(executor.requests()[0].command, "ls");
    }
}
