// ABOUTME: Workspace layout — the fixed subdirectories under a configured root.
// ABOUTME: Shared by the context collector, the session log, and the prompt preamble.

use std::path::{Path, PathBuf};

pub const PROJECT_DIR: &str = "project";
pub const PLANNING_DIR: &str = "planning";
pub const REFERENCE_DIR: &str = "reference";
pub const CHAT_DIR: &str = "chat-history";

/// Paths of the four workspace subdirectories relative to one root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    root: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The application being built.
    pub fn project_dir(&self) -> PathBuf {
        self.root.join(PROJECT_DIR)
    }

    /// Requirements and planning documents.
    pub fn planning_dir(&self) -> PathBuf {
        self.root.join(PLANNING_DIR)
    }

    /// User-uploaded examples and assets. Named in the prompt, never read.
    pub fn reference_dir(&self) -> PathBuf {
        self.root.join(REFERENCE_DIR)
    }

    /// Per-day session logs.
    pub fn chat_dir(&self) -> PathBuf {
        self.root.join(CHAT_DIR)
    }
}
