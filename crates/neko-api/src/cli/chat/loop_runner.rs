//! Main chat loop orchestration.
//!
//! Coordinates the conversation lifecycle: mode resolution, welcome banner,
//! input loop with a thinking spinner, slash commands, and export.

use std::path::PathBuf;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use neko_core::chat::orchestrator::Orchestrator;
use neko_infra::config::resolve_mode;
use neko_infra::export::write_export;
use neko_infra::filesystem::exports_dir;
use neko_types::chat::ResponseMode;

use crate::cli::display::{print_reply, print_transcript};
use crate::state::{AppState, submit_traced};

use super::banner::{print_welcome_banner, prompt_for};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

const HISTORY_PREVIEW_LEN: usize = 100;

/// Run the interactive chat loop in `mode`.
pub async fn run_chat_loop(state: &AppState, mode: ResponseMode) -> anyhow::Result<()> {
    let orchestrator = state.new_orchestrator(mode);
    print_welcome_banner(&orchestrator.mode(), state.router.registry().len());

    let (mut chat_input, _writer) = ChatInput::new(prompt_for(&orchestrator.mode()))
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    if matches!(cmd, ChatCommand::Exit) {
                        println!("\n  {}", style("Session ended.").dim());
                        break;
                    }
                    let mode_before = orchestrator.mode();
                    handle_command(state, &orchestrator, cmd).await;
                    let mode_after = orchestrator.mode();
                    if mode_after != mode_before {
                        chat_input.update_prompt(&prompt_for(&mode_after));
                    }
                    continue;
                }

                let spinner = thinking_spinner(&orchestrator.mode());
                let result = submit_traced(&orchestrator, "cli", &text).await;
                spinner.finish_and_clear();

                match result {
                    Ok(reply) => print_reply(&reply),
                    Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
                }
            }
        }
    }

    chat_input.flush();
    Ok(())
}

fn thinking_spinner(mode: &ResponseMode) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) =
        ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")
    {
        spinner.set_style(spinner_style);
    }
    let message = if mode.is_local() {
        "thinking...".to_string()
    } else {
        format!("asking {mode}...")
    };
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

async fn handle_command(state: &AppState, orchestrator: &Orchestrator, cmd: ChatCommand) {
    match cmd {
        ChatCommand::Help => commands::print_help(),
        ChatCommand::Mode(None) => {
            println!("\n  Mode: {}\n", style(orchestrator.mode()).cyan());
        }
        ChatCommand::Mode(Some(requested)) => match resolve_mode(&state.config, &requested) {
            Ok(mode) if state.is_known_mode(&mode) => {
                orchestrator.select_mode(mode.clone());
                println!("\n  {} Mode set to {}\n", style("*").cyan().bold(), style(mode).cyan());
            }
            Ok(mode) => {
                println!(
                    "\n  {} Provider '{}' has no usable endpoints.\n",
                    style("!").yellow().bold(),
                    mode.tag()
                );
            }
            Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
        },
        ChatCommand::Providers => {
            if let Err(e) = crate::cli::providers::list_providers(state, false) {
                println!("\n  {} {e}\n", style("!").red().bold());
            }
        }
        ChatCommand::History => {
            let messages = orchestrator.messages();
            if messages.is_empty() {
                println!("\n  {}\n", style("No messages yet.").dim());
            } else {
                print_transcript(&messages, HISTORY_PREVIEW_LEN);
            }
        }
        ChatCommand::Clear => match orchestrator.clear() {
            Ok(()) => println!("\n  {}\n", style("Conversation cleared.").dim()),
            Err(e) => println!("\n  {} {e}\n", style("!").yellow().bold()),
        },
        ChatCommand::Export(dir) => {
            let dir: PathBuf = dir.unwrap_or_else(|| exports_dir(&state.data_dir));
            match write_export(&dir, &orchestrator.export()).await {
                Ok(path) => println!(
                    "\n  {} Exported to {}\n",
                    style("*").cyan().bold(),
                    style(path.display()).dim()
                ),
                Err(e) => println!("\n  {} Export failed: {e}\n", style("!").red().bold()),
            }
        }
        ChatCommand::Unknown(name) => {
            println!(
                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                style("?").yellow().bold(),
                style(name).dim()
            );
        }
        // Handled by the loop itself.
        ChatCommand::Exit => {}
    }
}
