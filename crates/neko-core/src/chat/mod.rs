//! Conversation handling.
//!
//! - `SessionStore`: ordered message log and snapshot conversion
//! - `ResponseRouter`: local matcher vs. provider fallback chain
//! - `Orchestrator`: one session's request lifecycle and events

pub mod orchestrator;
pub mod router;
pub mod session;
