//! One-shot `neko ask` command.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use neko_types::chat::MessageRole;

use crate::cli::display::print_reply;
use crate::state::{AppState, submit_traced};

/// Submit `text` once and print the settled reply.
///
/// Exits with an error when the reply is error-role, so scripts can tell a
/// failed provider from an answer.
pub async fn ask(
    state: &AppState,
    text: &str,
    mode: Option<&str>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let mode = super::resolve_cli_mode(state, mode)?;
    let orchestrator = state.new_orchestrator(mode);

    let spinner = if json || quiet {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) =
            ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")
        {
            spinner.set_style(spinner_style);
        }
        spinner.set_message(format!("asking {}...", orchestrator.mode()));
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        spinner
    };

    let reply = submit_traced(&orchestrator, "cli", text).await;
    spinner.finish_and_clear();
    let reply = reply?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reply)?);
    } else if quiet {
        println!("{}", reply.content);
    } else {
        print_reply(&reply);
    }

    if reply.role == MessageRole::Error {
        anyhow::bail!("request settled with an error");
    }
    Ok(())
}
