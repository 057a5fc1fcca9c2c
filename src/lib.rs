// ABOUTME: Library root for workspace-dispatch — re-exports all modules for integration testing.
// ABOUTME: The binary entry point is in main.rs, which uses this crate as a library.

pub mod config;
pub mod context;
pub mod dispatch;
pub mod prompt;
pub mod session;
pub mod telemetry;
pub mod workspace;
