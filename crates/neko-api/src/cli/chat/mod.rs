//! Interactive CLI chat for NekoNet.
//!
//! Implements the chat loop: welcome banner, thinking spinner, slash
//! commands, and export. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
