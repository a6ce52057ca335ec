//! Infrastructure layer for NekoNet.
//!
//! Contains the implementations behind the ports defined in `neko-core`:
//! the HTTP provider adapter, configuration loading, data directory layout,
//! and session export files.

pub mod config;
pub mod export;
pub mod filesystem;
pub mod llm;
