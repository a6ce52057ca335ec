//! Slash command parsing for the chat loop.
//!
//! Commands start with `/` and provide in-chat controls for the response
//! mode, the session log, and exports.

use std::path::PathBuf;

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Show (no argument) or switch the response mode.
    Mode(Option<String>),
    /// List remote providers.
    Providers,
    /// Show conversation history for this session.
    History,
    /// Clear the session log.
    Clear,
    /// Export the session, optionally into a given directory.
    Export(Option<PathBuf>),
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let arg = parts
        .get(1)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/mode" | "/m" => Some(ChatCommand::Mode(arg)),
        "/providers" | "/p" => Some(ChatCommand::Providers),
        "/history" => Some(ChatCommand::History),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/export" => Some(ChatCommand::Export(arg.map(PathBuf::from))),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Usage and description of every command, in help order.
const HELP_ENTRIES: &[(&str, &str)] = &[
    ("/help", "Show this help message"),
    ("/mode [id]", "Show or switch mode (local or a provider id)"),
    ("/providers", "List remote providers"),
    ("/history", "Show conversation history"),
    ("/clear", "Clear the conversation"),
    ("/export [dir]", "Export the conversation as JSON"),
    ("/exit", "End the chat session"),
];

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    for (usage, description) in HELP_ENTRIES {
        println!("  {} {description}", style(format!("{usage:<14}")).cyan());
    }
    println!();
    println!("  {}", style("Ctrl+D to exit").dim());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_help() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/h"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
    }

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse("/mode"), Some(ChatCommand::Mode(None)));
        assert_eq!(parse("/mode   "), Some(ChatCommand::Mode(None)));
        assert_eq!(
            parse("/MODE remote-b"),
            Some(ChatCommand::Mode(Some("remote-b".to_string())))
        );
    }

    #[test]
    fn test_parse_export() {
        assert_eq!(parse("/export"), Some(ChatCommand::Export(None)));
        assert_eq!(
            parse("/export /tmp/out"),
            Some(ChatCommand::Export(Some(PathBuf::from("/tmp/out"))))
        );
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("what can you do"), None);
    }

    #[test]
    fn test_help_lists_only_known_commands() {
        for (usage, _) in HELP_ENTRIES {
            let name = usage.split(' ').next().unwrap();
            let parsed = parse(name).unwrap();
            assert!(
                !matches!(parsed, ChatCommand::Unknown(_)),
                "{usage} is listed in help but not parsed"
            );
        }
        assert_eq!(HELP_ENTRIES.len(), 7);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(parse("/foo"), Some(ChatCommand::Unknown("/foo".to_string())));
    }
}
