// ABOUTME: Context module — point-in-time snapshot of the workspace used to build a prompt.
// ABOUTME: Defines the snapshot type, its fallback sentinels, and the collector.

pub mod collector;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use collector::ContextCollector;

/// Used when the directory listing could not be produced.
pub const NO_FILE_TREE: &str = "No file tree available";
/// Used for a key project file that exists but is not readable text.
pub const UNREADABLE_PROJECT_FILE: &str = "[Binary or unreadable file]";
/// Used for a planning document that is not readable text.
pub const UNREADABLE_PLANNING_DOC: &str = "[Unreadable file]";
/// Used when the chat directory does not exist.
pub const NO_CHAT_HISTORY: &str = "No chat history yet";
/// Used when the chat directory holds no session logs.
pub const NO_CHAT_SESSIONS: &str = "No chat sessions yet";
/// Used when the latest session log could not be read.
pub const UNREADABLE_CHAT: &str = "Could not read recent chat";

/// Everything the assistant is shown about the workspace for one message.
///
/// Maps are keyed in sorted order so the rendered prompt is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Output of the directory listing, or [`NO_FILE_TREE`].
    pub workspace_structure: String,
    /// Key project files by path relative to `project/`.
    pub project_files: BTreeMap<String, String>,
    /// Planning documents by file name.
    pub planning_docs: BTreeMap<String, String>,
    /// Text of the most recent session log, or one of the chat sentinels.
    pub recent_chat: String,
}

impl WorkspaceSnapshot {
    /// Two-space indented JSON, as embedded in the prompt.
    pub fn to_pretty_json(&self) -> String {
        // A struct of strings and string maps always serializes.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}
