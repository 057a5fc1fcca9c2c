// ABOUTME: Integration tests for the prompt builder against a collected snapshot.
// ABOUTME: Verifies real workspace content lands in the prompt ahead of the message.

use std::fs;
use std::path::Path;

use workspace_dispatch::context::{ContextCollector, NO_CHAT_HISTORY};
use workspace_dispatch::prompt::PromptBuilder;
use workspace_dispatch::workspace::WorkspaceLayout;

fn collector(root: &Path) -> ContextCollector {
    ContextCollector::new(
        WorkspaceLayout::new(root),
        vec!["node_modules".to_string()],
        vec!["package.json".to_string()],
    )
    .with_tree_program("false")
}

#[tokio::test]
async fn collected_files_appear_in_prompt() {
    let tmp = tempfile::tempdir().unwrap();
    fs::create_dir_all(tmp.path().join("project")).unwrap();
    fs::create_dir_all(tmp.path().join("planning")).unwrap();
    fs::write(tmp.path().join("project/package.json"), "{\"name\": \"todo\"}").unwrap();
    fs::write(tmp.path().join("planning/roadmap.md"), "ship v1").unwrap();

    let c = collector(tmp.path());
    let snapshot = c.collect().await;
    let prompt = PromptBuilder::new(c.layout()).build(&snapshot, "what next?");

    assert!(prompt.contains(r#""package.json": "{\"name\": \"todo\"}""#));
    assert!(prompt.contains(r#""roadmap.md": "ship v1""#));
    assert!(prompt.contains(&format!("\"recent_chat\": \"{}\"", NO_CHAT_HISTORY)));

    let context_pos = prompt.find("roadmap.md").unwrap();
    let message_pos = prompt.find("what next?").unwrap();
    assert!(context_pos < message_pos, "context should precede the message");
}

#[tokio::test]
async fn prompt_preamble_uses_workspace_root() {
    let tmp = tempfile::tempdir().unwrap();
    let c = collector(tmp.path());
    let snapshot = c.collect().await;
    let prompt = PromptBuilder::new(c.layout()).build(&snapshot, "hi");

    let project_line = format!(
        "- {}/ - The React app being built",
        tmp.path().join("project").display()
    );
    assert!(prompt.contains(&project_line));
}
