//! Response orchestration logic for NekoNet.
//!
//! This crate defines the adapter trait (the "port") that the infrastructure
//! layer implements, plus everything that runs on top of it: the knowledge
//! matcher, the fallback executor, the response router, the session store and
//! the orchestrator. It depends only on `neko-types` -- never on `neko-infra`
//! or any HTTP crate.

pub mod chat;
pub mod event;
pub mod knowledge;
pub mod llm;
