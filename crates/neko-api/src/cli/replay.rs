//! `neko replay`: validate and print an exported session.

use std::path::Path;

use anyhow::{Context, Result};
use console::style;

use neko_infra::export::read_export;

use crate::cli::display::print_transcript;

pub async fn replay(file: &Path, json: bool) -> Result<()> {
    let snapshot = read_export(file)
        .await
        .with_context(|| format!("Failed to load export {}", file.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("Session export").bold(),
        style(file.display()).dim()
    );
    println!(
        "  {}  {}",
        style("Exported:").bold(),
        style(snapshot.exported_at.to_rfc3339()).dim()
    );
    println!(
        "  {}  {}",
        style("Provider:").bold(),
        style(&snapshot.provider_id).cyan()
    );
    println!(
        "  {}  {}",
        style("Messages:").bold(),
        snapshot.messages.len()
    );

    print_transcript(&snapshot.messages, usize::MAX);
    Ok(())
}
