// ABOUTME: Assistant invocation — runs the external assistant CLI with the built prompt.
// ABOUTME: Captures stdout/stderr, enforces the wall-clock timeout, and kills the child on expiry.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use super::outcome::DispatchOutcome;
use crate::config::AssistantConfig;

/// Something that can answer a prompt from within a workspace.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Name used in user-facing error text.
    fn name(&self) -> &str;

    /// Run the prompt with `cwd` as working directory. Never fails: every
    /// way a run can end is a [`DispatchOutcome`].
    async fn invoke(&self, prompt: &str, cwd: &Path) -> DispatchOutcome;
}

/// Runs an executable as `<command> [args..] <prompt>`.
#[derive(Debug, Clone)]
pub struct CommandAssistant {
    pub command: String,
    pub args: Vec<String>,
    pub timeout: Duration,
}

impl CommandAssistant {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout,
        }
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
impl Assistant for CommandAssistant {
    fn name(&self) -> &str {
        &self.command
    }

    async fn invoke(&self, prompt: &str, cwd: &Path) -> DispatchOutcome {
        let child = Command::new(&self.command)
            .args(&self.args)
            .arg(prompt)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(child) => child,
            Err(e) => {
                tracing::warn!(command = %self.command, error = %e, "failed to spawn assistant");
                return DispatchOutcome::Internal {
                    message: e.to_string(),
                };
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Err(_) => {
                tracing::warn!(command = %self.command, timeout = ?self.timeout, "assistant timed out");
                DispatchOutcome::TimedOut {
                    after: self.timeout,
                }
            }
            Ok(Err(e)) => DispatchOutcome::Internal {
                message: e.to_string(),
            },
            Ok(Ok(out)) if out.status.success() => DispatchOutcome::Completed {
                stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            },
            Ok(Ok(out)) => {
                tracing::debug!(status = %out.status, "assistant exited unsuccessfully");
                DispatchOutcome::ToolFailed {
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                    exit_code: out.status.code(),
                }
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    /// `sh -c <script> <prompt>`: the prompt lands in `$0`.
    fn script(body: &str, timeout: Duration) -> CommandAssistant {
        CommandAssistant::new("sh", timeout).with_args(["-c", body])
    }

    #[tokio::test]
    async fn zero_exit_returns_stdout() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = script("printf OK", Duration::from_secs(10))
            .invoke("the prompt", tmp.path())
            .await;
        assert_eq!(
            outcome,
            DispatchOutcome::Completed {
                stdout: "OK".to_string()
            }
        );
    }

    #[tokio::test]
    async fn prompt_is_last_argument_and_cwd_is_set() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = script("printf '%s|' \"$0\"; pwd", Duration::from_secs(10))
            .invoke("hello prompt", tmp.path())
            .await;
        let DispatchOutcome::Completed { stdout } = outcome else {
            panic!("expected Completed, got {:?}", outcome);
        };
        let (prompt, cwd) = stdout.split_once('|').unwrap();
        assert_eq!(prompt, "hello prompt");
        let cwd = std::fs::canonicalize(cwd.trim()).unwrap();
        assert_eq!(cwd, std::fs::canonicalize(tmp.path()).unwrap());
    }

    #[tokio::test]
    async fn nonzero_exit_returns_stderr() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = script("printf 'bad input' >&2; exit 3", Duration::from_secs(10))
            .invoke("p", tmp.path())
            .await;
        assert_eq!(
            outcome,
            DispatchOutcome::ToolFailed {
                stderr: "bad input".to_string(),
                exit_code: Some(3),
            }
        );
    }

    #[tokio::test]
    async fn slow_assistant_times_out() {
        let tmp = tempfile::tempdir().unwrap();
        let started = std::time::Instant::now();
        let outcome = script("sleep 5", Duration::from_millis(200))
            .invoke("p", tmp.path())
            .await;
        assert!(matches!(outcome, DispatchOutcome::TimedOut { .. }));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn missing_executable_is_internal() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = CommandAssistant::new("wsd-no-such-assistant", Duration::from_secs(1))
            .invoke("p", tmp.path())
            .await;
        assert!(matches!(outcome, DispatchOutcome::Internal { .. }));
    }
}
