// ABOUTME: Dispatch module — invokes the external assistant and reports how it went.
// ABOUTME: Ties the collector, prompt builder, and session log into one pipeline.

pub mod assistant;
pub mod dispatcher;
pub mod outcome;

pub use assistant::{Assistant, CommandAssistant};
pub use dispatcher::Dispatcher;
pub use outcome::{DispatchOutcome, DispatchResult, TIMEOUT_MESSAGE, TIMEOUT_TAG};
