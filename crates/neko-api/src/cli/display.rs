//! Styled terminal rendering of session messages.

use console::style;

use neko_types::chat::{Message, MessageRole};

/// Styled role label: `You`, `Neko` or `Error`.
pub fn role_label(role: MessageRole) -> String {
    match role {
        MessageRole::User => format!("{}", style("You").green().bold()),
        MessageRole::Assistant => format!("{}", style("Neko").cyan().bold()),
        MessageRole::Error => format!("{}", style("Error").red().bold()),
    }
}

/// Attribution suffix, e.g. `[local 98%]` or `[remote-b]`.
pub fn attribution(message: &Message) -> Option<String> {
    let tag = message.provider_tag.as_deref()?;
    Some(match message.confidence {
        Some(confidence) => format!("[{tag} {confidence}%]"),
        None => format!("[{tag}]"),
    })
}

/// Print a settled reply with its attribution.
pub fn print_reply(message: &Message) {
    println!();
    let suffix = attribution(message)
        .map(|a| format!(" {}", style(a).dim()))
        .unwrap_or_default();
    println!("  {}{}", role_label(message.role), suffix);
    for line in message.content.lines() {
        match message.role {
            MessageRole::Error => println!("  {}", style(line).red()),
            _ => println!("  {line}"),
        }
    }
    println!();
}

/// Print a transcript, one line per message.
pub fn print_transcript(messages: &[Message], preview_len: usize) {
    println!();
    for msg in messages {
        let content = if msg.content.chars().count() > preview_len {
            let cut: String = msg.content.chars().take(preview_len.saturating_sub(3)).collect();
            format!("{cut}...")
        } else {
            msg.content.clone()
        };
        println!(
            "  {} {} {}",
            style(msg.timestamp.format("%H:%M:%S")).dim(),
            role_label(msg.role),
            content
        );
    }
    println!();
}
