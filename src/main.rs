// ABOUTME: Entry point for wsd — sends one message, with workspace context, to the assistant CLI.
// ABOUTME: Parses CLI args, loads config, runs the dispatcher, and prints the JSON result.

use std::path::PathBuf;

use clap::Parser;

use workspace_dispatch::config::{Config, Overrides, load_env_file};
use workspace_dispatch::dispatch::Dispatcher;
use workspace_dispatch::telemetry;

const USAGE: &str = "Usage: wsd 'Your message to the assistant'";

#[derive(Debug, Parser)]
#[command(name = "wsd", version, about = "Send a message with workspace context to an assistant CLI")]
struct Cli {
    /// Workspace root (default: /workspace).
    #[arg(long, value_name = "DIR")]
    workspace: Option<PathBuf>,

    /// Config file (default: ~/.workspace-dispatch/config.toml).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Assistant executable to invoke.
    #[arg(long, value_name = "PROGRAM")]
    tool: Option<String>,

    /// Seconds the assistant may run before it is killed.
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Message words, joined with spaces.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.message.is_empty() {
        println!("{}", USAGE);
        std::process::exit(1);
    }

    telemetry::init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    });
    config.apply(Overrides {
        workspace: cli.workspace,
        tool: cli.tool,
        timeout_seconds: cli.timeout,
    });

    // The assistant inherits our environment, including the workspace's .env.
    if let Err(e) = load_env_file(&config.workspace.root.join(".env")) {
        tracing::warn!(error = %e, "skipping workspace .env");
    }

    let message = cli.message.join(" ");
    let result = Dispatcher::from_config(&config).dispatch(&message).await;
    println!("{}", result.to_json()?);
    Ok(())
}
