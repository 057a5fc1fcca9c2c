// ABOUTME: Session module — persistence of the conversation history to disk.
// ABOUTME: Provides the append-only per-day markdown log of user/assistant exchanges.

pub mod log;

pub use log::{LogEntry, Role, SessionLog, parse_entries};
