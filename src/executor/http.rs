//! REST executor posting to the backend's `/api/terminal/execute` route.

use super::{CommandExecutor, ExecuteRequest, ExecuteResult};
use crate::config::BackendConfig;
use crate::error::ExecuteError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const EXECUTE_PATH: &str = "/api/terminal/execute";
const REJECTED_FALLBACK: &str = "Command execution failed";

/// Executor that forwards commands to the ShellIDE backend over HTTP.
pub struct HttpExecutor {
    http: reqwest::Client,
    base_url: String,
    auth_token: String,
}

/// Error body shape used by the backend (`{"detail": "..."}`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl HttpExecutor {
    /// Build an executor from resolved backend settings.
    pub fn new(config: &BackendConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs.max(1));
        Self::with_timeout(&config.base_url, &config.auth_token, timeout)
    }

    pub fn with_timeout(base_url: &str, auth_token: &str, timeout: Duration) -> Self {
        Self {
            http: build_http_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token: auth_token.trim().to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}{EXECUTE_PATH}", self.base_url)
    }
}

/// Build an HTTP client with timeout applied.
fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[async_trait]
impl CommandExecutor for HttpExecutor {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResult, ExecuteError> {
        let url = self.endpoint();
        tracing::debug!(%url, command = %request.command, "posting command");

        let mut req = self.http.post(&url).json(request);
        if !self.auth_token.is_empty() {
            req = req.header("Authorization", format!("Bearer {}", self.auth_token));
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "backend rejected command");
            return Err(ExecuteError::Status {
                code: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        let result = response.json::<ExecuteResult>().await?;
        if !result.success {
            let message = result.stderr.trim();
            return Err(ExecuteError::Rejected(if message.is_empty() {
                REJECTED_FALLBACK.to_string()
            } else {
                message.to_string()
            }));
        }
        Ok(result)
    }
}

/// Extract the `detail` message from an error body, falling back to raw text.
fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: Some(detail),
        }) => detail,
        _ => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.expect("accept");
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            stream.write_all(response.as_bytes()).await.expect("write");
            stream.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{addr}"), handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let length = text[..split]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= split + 4 + length
    }

    fn request(command: &str) -> ExecuteRequest {
        ExecuteRequest {
            command: command.to_string(),
            cwd: "/work".to_string(),
            project_id: Some("42".to_string()),
        }
    }

    #[tokio::test]
    async fn posts_command_with_bearer_token() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"stdout":"x\n","stderr":"","exit_code":0,"execution_time":7,"working_directory":"/work"}"#,
        )
        .await;
        let executor = HttpExecutor::with_timeout(&base, "tok-123", Duration::from_secs(5));

        let result = executor.execute(&request("ls")).await.expect("result");
        assert_eq!(result.stdout, "x\n");
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.duration_ms, 7);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/terminal/execute"), "got: {raw}");
        assert!(raw.to_ascii_lowercase().contains("authorization: bearer tok-123"));
        assert!(raw.contains(r#""working_directory":"/work""#));
        assert!(raw.contains(r#""project_id":"42""#));
    }

    #[tokio::test]
    async fn error_status_surfaces_detail() {
        let (base, server) = serve_once(
            "400 Bad Request",
            r#"{"detail":"Command not allowed for security reasons"}"#,
        )
        .await;
        let executor = HttpExecutor::with_timeout(&base, "", Duration::from_secs(5));

        let err = executor.execute(&request("sudo ls")).await.expect_err("status");
        match err {
            ExecuteError::Status { code, detail } => {
                assert_eq!(code, 400);
                assert_eq!(detail, "Command not allowed for security reasons");
            }
            other => panic!("expected status error, got: {other}"),
        }

        let raw = server.await.unwrap();
        assert!(!raw.to_ascii_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn unsuccessful_payload_is_rejected() {
        let (base, _server) = serve_once("200 OK", r#"{"success":false,"error":"no project"}"#).await;
        let executor = HttpExecutor::with_timeout(&base, "", Duration::from_secs(5));

        let err = executor.execute(&request("ls")).await.expect_err("rejected");
        assert_eq!(err.to_string(), "no project");
    }

    #[tokio::test]
    async fn executor_respects_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept one connection and keep it open so the client must time out.
        let _accept = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.expect("accept");
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let executor =
            HttpExecutor::with_timeout(&format!("http://{addr}"), "", Duration::from_millis(50));
        let err = executor.execute(&request("sleep 10")).await.expect_err("timeout");
        match err {
            ExecuteError::Http(inner) => assert!(inner.is_timeout(), "unexpected: {inner}"),
            other => panic!("expected timeout Http error, got: {other}"),
        }
    }

    #[test]
    fn error_detail_falls_back_to_raw_body() {
        assert_eq!(error_detail(r#"{"detail":"nope"}"#), "nope");
        assert_eq!(error_detail("  gateway down \n"), "gateway down");
        assert_eq!(error_detail(r#"{"other":1}"#), r#"{"other":1}"#);
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let executor = HttpExecutor::with_timeout("http://host:8000/", "", Duration::from_secs(1));
        assert_eq!(executor.endpoint(), "http://host:8000/api/terminal/execute");
    }
}
