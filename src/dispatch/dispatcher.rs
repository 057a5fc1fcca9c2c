// ABOUTME: Dispatcher — the linear pipeline run once per user message.
// ABOUTME: Log user message, snapshot workspace, build prompt, invoke assistant, log response.

use std::sync::Arc;

use super::assistant::{Assistant, CommandAssistant};
use super::outcome::{DispatchOutcome, DispatchResult};
use crate::config::Config;
use crate::context::ContextCollector;
use crate::prompt::PromptBuilder;
use crate::session::{Role, SessionLog};

/// Runs one message through collector, prompt builder, and assistant.
pub struct Dispatcher {
    collector: ContextCollector,
    prompt: PromptBuilder,
    log: SessionLog,
    assistant: Arc<dyn Assistant>,
}

impl Dispatcher {
    pub fn new(collector: ContextCollector, assistant: Arc<dyn Assistant>) -> Self {
        let layout = collector.layout();
        let prompt = PromptBuilder::new(layout);
        let log = SessionLog::new(layout.chat_dir());
        Self {
            collector,
            prompt,
            log,
            assistant,
        }
    }

    /// Wire up the process-backed assistant from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ContextCollector::from_config(&config.workspace),
            Arc::new(CommandAssistant::from_config(&config.assistant)),
        )
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    /// Run the pipeline and return how the assistant run ended.
    ///
    /// The assistant's response is logged on every path, including timeouts
    /// and spawn failures, so each message leaves exactly one user and one
    /// assistant entry behind.
    pub async fn run(&self, message: &str) -> DispatchOutcome {
        self.record(Role::User, message);

        let snapshot = self.collector.collect().await;
        let prompt = self.prompt.build(&snapshot, message);
        tracing::debug!(
            prompt_bytes = prompt.len(),
            project_files = snapshot.project_files.len(),
            planning_docs = snapshot.planning_docs.len(),
            "dispatching to assistant"
        );

        let outcome = self
            .assistant
            .invoke(&prompt, self.collector.layout().root())
            .await;

        self.record(Role::Assistant, &outcome.response(self.assistant.name()));
        outcome
    }

    /// Run the pipeline and collapse the outcome into the printed result.
    pub async fn dispatch(&self, message: &str) -> DispatchResult {
        let outcome = self.run(message).await;
        outcome.into_result(self.assistant.name())
    }

    fn record(&self, role: Role, body: &str) {
        if let Err(e) = self.log.append(role, body) {
            tracing::warn!(role = role.header_tag(), error = %e, "failed to write session log");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::config::WorkspaceConfig;

    /// Records every prompt and answers with a fixed outcome.
    struct Scripted {
        outcome: DispatchOutcome,
        seen: Mutex<Vec<(String, PathBuf)>>,
    }

    #[async_trait]
    impl Assistant for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn invoke(&self, prompt: &str, cwd: &Path) -> DispatchOutcome {
            self.seen
                .lock()
                .unwrap()
                .push((prompt.to_string(), cwd.to_path_buf()));
            self.outcome.clone()
        }
    }

    fn dispatcher(root: &Path, outcome: DispatchOutcome) -> (Dispatcher, Arc<Scripted>) {
        let collector = ContextCollector::from_config(&WorkspaceConfig {
            root: root.to_path_buf(),
            ..WorkspaceConfig::default()
        })
        .with_tree_program("false");
        let assistant = Arc::new(Scripted {
            outcome,
            seen: Mutex::new(Vec::new()),
        });
        (Dispatcher::new(collector, assistant.clone()), assistant)
    }

    #[tokio::test]
    async fn prompt_sees_message_and_logged_user_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let (d, assistant) = dispatcher(
            tmp.path(),
            DispatchOutcome::Completed {
                stdout: "done".to_string(),
            },
        );

        let result = d.dispatch("make the header blue").await;
        assert!(result.success);
        assert_eq!(result.response, "done");

        let seen = assistant.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (prompt, cwd) = &seen[0];
        assert_eq!(cwd, tmp.path());
        assert!(prompt.contains("USER MESSAGE:\nmake the header blue\n"));
        // The user entry is written before the snapshot is taken.
        assert!(prompt.contains("## USER ("));
    }

    #[tokio::test]
    async fn timeout_still_logs_assistant_entry() {
        let tmp = tempfile::tempdir().unwrap();
        let (d, _) = dispatcher(
            tmp.path(),
            DispatchOutcome::TimedOut {
                after: std::time::Duration::from_secs(120),
            },
        );

        let result = d.dispatch("slow request").await;
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("timeout"));

        let text = std::fs::read_to_string(d.session_log().today_path()).unwrap();
        let entries = crate::session::parse_entries(&text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role, Role::User);
        assert_eq!(entries[1].role, Role::Assistant);
        assert_eq!(entries[1].body, result.response);
    }

    #[tokio::test]
    async fn internal_error_uses_assistant_name() {
        let tmp = tempfile::tempdir().unwrap();
        let (d, _) = dispatcher(
            tmp.path(),
            DispatchOutcome::Internal {
                message: "boom".to_string(),
            },
        );

        let result = d.dispatch("anything").await;
        assert_eq!(result.response, "Error executing scripted: boom");
        assert_eq!(result.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn unwritable_log_does_not_abort_dispatch() {
        let tmp = tempfile::tempdir().unwrap();
        // A regular file where the chat directory should be.
        std::fs::write(tmp.path().join("chat-history"), "in the way").unwrap();
        let (d, _) = dispatcher(
            tmp.path(),
            DispatchOutcome::Completed {
                stdout: "fine".to_string(),
            },
        );

        let result = d.dispatch("hello").await;
        assert!(result.success);
        assert_eq!(result.response, "fine");
    }
}
