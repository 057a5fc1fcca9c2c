// ABOUTME: Configuration loading for workspace-dispatch.
// ABOUTME: Reads ~/.workspace-dispatch/config.toml (or --config) and applies CLI overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub workspace: WorkspaceConfig,
    pub assistant: AssistantConfig,
}

/// Where the workspace lives and which parts of it feed the snapshot.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub root: PathBuf,
    pub tree_excludes: Vec<String>,
    pub key_files: Vec<String>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/workspace"),
            tree_excludes: vec!["node_modules".to_string(), ".git".to_string()],
            key_files: vec![
                "package.json".to_string(),
                "src/App.tsx".to_string(),
                "src/index.tsx".to_string(),
                "README.md".to_string(),
            ],
        }
    }
}

/// External assistant executable and how long it may run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub command: String,
    /// Extra arguments placed before the prompt.
    pub args: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            command: "claude-code".to_string(),
            args: Vec::new(),
            timeout_seconds: 120,
        }
    }
}

impl AssistantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Values given on the command line, applied on top of the file config.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub workspace: Option<PathBuf>,
    pub tool: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl Config {
    /// Load config from ~/.workspace-dispatch/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".workspace-dispatch")
            .join("config.toml")
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(root) = overrides.workspace {
            self.workspace.root = root;
        }
        if let Some(tool) = overrides.tool {
            self.assistant.command = tool;
        }
        if let Some(secs) = overrides.timeout_seconds {
            self.assistant.timeout_seconds = secs;
        }
    }
}

/// Load `KEY=value` pairs from an env file into the process environment.
///
/// Returns `Ok(false)` when the file does not exist; a file that exists but
/// cannot be read or parsed is an error.
pub fn load_env_file(path: &Path) -> anyhow::Result<bool> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("loading env file {}", path.display())),
    }
}
