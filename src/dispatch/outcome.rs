// ABOUTME: Dispatch outcome and result types.
// ABOUTME: DispatchOutcome discriminates how the assistant run ended; DispatchResult is the printed JSON.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Response shown to the user when the assistant exceeds its time budget.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try with a simpler request.";
/// Error tag reported for a timed-out run.
pub const TIMEOUT_TAG: &str = "timeout";

/// How one invocation of the assistant ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The assistant exited with status zero.
    Completed { stdout: String },
    /// The assistant ran but exited non-zero (or was killed by a signal).
    ToolFailed {
        stderr: String,
        exit_code: Option<i32>,
    },
    /// The assistant did not finish within its time budget and was killed.
    TimedOut { after: Duration },
    /// The assistant could not be run at all.
    Internal { message: String },
}

impl DispatchOutcome {
    /// Text recorded in the session log and returned as `response`.
    pub fn response(&self, tool: &str) -> String {
        match self {
            DispatchOutcome::Completed { stdout } => stdout.clone(),
            DispatchOutcome::ToolFailed { stderr, .. } => format!("Error: {}", stderr),
            DispatchOutcome::TimedOut { .. } => TIMEOUT_MESSAGE.to_string(),
            DispatchOutcome::Internal { message } => {
                format!("Error executing {}: {}", tool, message)
            }
        }
    }

    /// Whether the assistant process actually ran to exit.
    pub fn tool_ran(&self) -> bool {
        matches!(
            self,
            DispatchOutcome::Completed { .. } | DispatchOutcome::ToolFailed { .. }
        )
    }

    /// Collapse into the caller-facing result.
    ///
    /// A non-zero exit still reports `success: true`; callers that need to
    /// tell it apart should match on the outcome instead.
    pub fn into_result(self, tool: &str) -> DispatchResult {
        let response = self.response(tool);
        match self {
            DispatchOutcome::Completed { .. } | DispatchOutcome::ToolFailed { .. } => {
                DispatchResult {
                    success: true,
                    response,
                    context_used: Some(true),
                    workspace_updated: Some(true),
                    error: None,
                }
            }
            DispatchOutcome::TimedOut { .. } => DispatchResult::failure(response, TIMEOUT_TAG),
            DispatchOutcome::Internal { message } => DispatchResult::failure(response, message),
        }
    }
}

/// The single structured object printed to stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub success: bool,
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_used: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_updated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DispatchResult {
    pub fn failure(response: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            response: response.into(),
            context_used: None,
            workspace_updated: None,
            error: Some(error.into()),
        }
    }

    /// Two-space indented JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
