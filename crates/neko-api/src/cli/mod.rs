//! CLI command definitions and dispatch for the `neko` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod display;
pub mod providers;
pub mod replay;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use neko_infra::config::resolve_mode;
use neko_types::chat::ResponseMode;

use crate::state::AppState;

/// NekoNet OSINT assistant: local answers plus remote providers with mirror fallback.
#[derive(Parser)]
#[command(name = "neko", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session.
    Chat {
        /// Response mode: `local` or a configured provider id.
        #[arg(long, short = 'm')]
        mode: Option<String>,
    },

    /// Ask a single question and print the reply.
    Ask {
        /// The question.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Response mode: `local` or a configured provider id.
        #[arg(long, short = 'm')]
        mode: Option<String>,
    },

    /// List configured remote providers and their mirror order.
    #[command(alias = "ls")]
    Providers,

    /// Validate and print an exported session file.
    Replay {
        /// Path to a `neko-export-*.json` file.
        file: PathBuf,
    },

    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Resolve a `--mode` flag against the configured providers.
///
/// Without a flag, the configured default mode is used.
pub fn resolve_cli_mode(state: &AppState, mode: Option<&str>) -> anyhow::Result<ResponseMode> {
    match mode {
        Some(m) => resolve_mode(&state.config, m).context("Invalid --mode"),
        None => Ok(state.default_mode.clone()),
    }
}
