//! Welcome banner display for chat sessions.

use console::style;

use neko_types::chat::ResponseMode;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the active response mode and how many remote providers are
/// available to switch to.
pub fn print_welcome_banner(mode: &ResponseMode, provider_count: usize) {
    println!();
    println!("  🐾 {}", style("NekoNet Assistant").cyan().bold());
    println!(
        "  {}",
        style("OSINT help from the local knowledge base or a remote provider").dim()
    );
    println!();
    println!("  {}       {}", style("Mode:").bold(), style(mode).cyan());
    println!(
        "  {}  {}",
        style("Providers:").bold(),
        style(provider_count).dim()
    );
    println!();
    println!("  {}", style("Type /help for commands, Ctrl+D to exit").dim());
    println!("  {}", style("---").dim());
    println!();
}

/// Prompt string showing the active mode.
pub fn prompt_for(mode: &ResponseMode) -> String {
    format!(
        "  {} {} ",
        style(format!("[{mode}]")).dim(),
        style("You >").green().bold()
    )
}
