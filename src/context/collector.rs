// ABOUTME: Context collector — reads the tree listing, key files, planning docs, and latest chat.
// ABOUTME: Never fails: every missing or unreadable piece degrades to a sentinel string.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use glob::{MatchOptions, Pattern};
use tokio::process::Command;

use super::{
    NO_CHAT_HISTORY, NO_CHAT_SESSIONS, NO_FILE_TREE, UNREADABLE_CHAT, UNREADABLE_PLANNING_DOC,
    UNREADABLE_PROJECT_FILE, WorkspaceSnapshot,
};
use crate::config::WorkspaceConfig;
use crate::workspace::WorkspaceLayout;

const TREE_PROGRAM: &str = "tree";

/// Builds a [`WorkspaceSnapshot`] from a workspace root.
#[derive(Debug, Clone)]
pub struct ContextCollector {
    layout: WorkspaceLayout,
    tree_program: String,
    tree_excludes: Vec<String>,
    key_files: Vec<String>,
}

impl ContextCollector {
    pub fn new(layout: WorkspaceLayout, tree_excludes: Vec<String>, key_files: Vec<String>) -> Self {
        Self {
            layout,
            tree_program: TREE_PROGRAM.to_string(),
            tree_excludes,
            key_files,
        }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(
            WorkspaceLayout::new(&config.root),
            config.tree_excludes.clone(),
            config.key_files.clone(),
        )
    }

    /// Replace the listing program. It is called as `<program> -I <excludes> <root>`.
    pub fn with_tree_program(mut self, program: impl Into<String>) -> Self {
        self.tree_program = program.into();
        self
    }

    pub fn layout(&self) -> &WorkspaceLayout {
        &self.layout
    }

    /// Gather every part of the snapshot.
    pub async fn collect(&self) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            workspace_structure: self.file_tree().await,
            project_files: self.project_files(),
            planning_docs: self.planning_docs(),
            recent_chat: self.recent_chat(),
        }
    }

    /// Directory listing of the whole workspace, minus the excluded names.
    pub async fn file_tree(&self) -> String {
        let mut cmd = Command::new(&self.tree_program);
        if !self.tree_excludes.is_empty() {
            cmd.arg("-I").arg(self.tree_excludes.join("|"));
        }
        cmd.arg(self.layout.root())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());

        match cmd.output().await {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).into_owned(),
            Ok(out) => {
                tracing::debug!(status = %out.status, "tree listing failed");
                NO_FILE_TREE.to_string()
            }
            Err(e) => {
                tracing::debug!(program = %self.tree_program, error = %e, "tree listing unavailable");
                NO_FILE_TREE.to_string()
            }
        }
    }

    /// Contents of the configured key files that exist under `project/`.
    pub fn project_files(&self) -> BTreeMap<String, String> {
        let project_dir = self.layout.project_dir();
        let mut files = BTreeMap::new();
        for rel in &self.key_files {
            let full = project_dir.join(rel);
            if !full.exists() {
                continue;
            }
            let text = read_or(&full, UNREADABLE_PROJECT_FILE);
            files.insert(rel.clone(), text);
        }
        files
    }

    /// Every `*.md` directly under `planning/`, keyed by file name.
    pub fn planning_docs(&self) -> BTreeMap<String, String> {
        let planning_dir = self.layout.planning_dir();
        let mut docs = BTreeMap::new();
        if !planning_dir.exists() {
            return docs;
        }
        for path in glob_in(&planning_dir, "*.md") {
            let Some(name) = path.file_name() else {
                continue;
            };
            let text = read_or(&path, UNREADABLE_PLANNING_DOC);
            docs.insert(name.to_string_lossy().into_owned(), text);
        }
        docs
    }

    /// Full text of the lexicographically last `session-*.md` log.
    pub fn recent_chat(&self) -> String {
        let chat_dir = self.layout.chat_dir();
        if !chat_dir.exists() {
            return NO_CHAT_HISTORY.to_string();
        }
        let mut sessions = glob_in(&chat_dir, "session-*.md");
        sessions.sort();
        match sessions.last() {
            Some(latest) => read_or(latest, UNREADABLE_CHAT),
            None => NO_CHAT_SESSIONS.to_string(),
        }
    }
}

fn read_or(path: &Path, sentinel: &str) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "substituting unreadable file");
            sentinel.to_string()
        }
    }
}

/// Paths directly inside `dir` whose names match `pattern`. Hidden files are skipped.
fn glob_in(dir: &Path, pattern: &str) -> Vec<PathBuf> {
    let full = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    match glob::glob_with(&full, options) {
        Ok(paths) => paths.filter_map(Result::ok).collect(),
        Err(e) => {
            tracing::warn!(pattern = %full, error = %e, "invalid glob pattern");
            Vec::new()
        }
    }
}
