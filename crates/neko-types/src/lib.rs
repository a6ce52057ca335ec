//! Shared domain types for NekoNet.
//!
//! This crate contains the types used across the response orchestrator:
//! chat messages and snapshots, knowledge entries, provider configuration,
//! orchestrator events, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod knowledge;
pub mod provider;
