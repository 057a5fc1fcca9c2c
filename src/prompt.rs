// ABOUTME: Prompt builder — embeds the workspace snapshot and user message in one text blob.
// ABOUTME: The instructional preamble is compiled in from src/prompts/workspace.md.

use std::path::Path;

use crate::context::WorkspaceSnapshot;
use crate::workspace::WorkspaceLayout;

/// Compiled-in preamble describing the workspace directories.
const WORKSPACE_PREAMBLE: &str = include_str!("prompts/workspace.md");

fn dir_label(path: &Path) -> String {
    format!("{}/", path.display())
}

/// Fill the preamble's directory placeholders from `layout`.
pub fn render_preamble(layout: &WorkspaceLayout) -> String {
    WORKSPACE_PREAMBLE
        .replace("{project}", &dir_label(&layout.project_dir()))
        .replace("{planning}", &dir_label(&layout.planning_dir()))
        .replace("{reference}", &dir_label(&layout.reference_dir()))
        .replace("{chat}", &dir_label(&layout.chat_dir()))
}

/// Assembles the prompt handed to the assistant.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    pub preamble: String,
}

impl PromptBuilder {
    /// Creates a builder whose preamble names the directories of `layout`.
    pub fn new(layout: &WorkspaceLayout) -> Self {
        Self {
            preamble: render_preamble(layout),
        }
    }

    /// Context first, then the literal message, then the preamble.
    pub fn build(&self, snapshot: &WorkspaceSnapshot, message: &str) -> String {
        format!(
            "\nWORKSPACE CONTEXT:\n{}\n\nUSER MESSAGE:\n{}\n\n{}",
            snapshot.to_pretty_json(),
            message,
            self.preamble
        )
    }
}
