//! The transactional save orchestrator.
//!
//! Inbound requests are tagged variants; the orchestrator matches on them
//! and runs a fixed step sequence, emitting further commands through a
//! [`CommandSink`] instead of routing anything through a shared dispatcher.

pub mod command;
pub mod orchestrator;
pub mod request;
pub mod state;

pub use command::{Command, CommandSink};
pub use orchestrator::{Outcome, PipelineError, TransactionOrchestrator};
pub use request::Request;
pub use state::PipelineState;
