//! `neko providers`: list configured remote providers.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use crate::state::AppState;

/// Print each provider with its endpoints in fallback order.
pub fn list_providers(state: &AppState, json: bool) -> Result<()> {
    let providers = &state.config.providers;

    if json {
        println!("{}", serde_json::to_string_pretty(providers)?);
        return Ok(());
    }

    if providers.is_empty() {
        println!();
        println!(
            "  {} No remote providers configured. Add a {} section to {}.",
            style("i").blue().bold(),
            style("[[providers]]").cyan(),
            style(state.data_dir.join("config.toml").display()).dim()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("  {}", style("Remote Providers").bold());
    println!();

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Provider").fg(Color::White),
        Cell::new("Order").fg(Color::White),
        Cell::new("Endpoint").fg(Color::White),
        Cell::new("Param").fg(Color::White),
        Cell::new("Fields").fg(Color::White),
    ]);

    for provider in providers {
        let registered = state.router.registry().contains(&provider.id);
        let name_cell = if registered {
            Cell::new(format!("{} ({})", provider.display_name(), provider.id)).fg(Color::Cyan)
        } else {
            Cell::new(format!("{} (skipped)", provider.id)).fg(Color::Red)
        };
        table.add_row(vec![name_cell, Cell::new(""), Cell::new(""), Cell::new(""), Cell::new("")]);

        for endpoint in provider.sorted_endpoints() {
            table.add_row(vec![
                Cell::new(""),
                Cell::new(endpoint.order).fg(Color::Cyan),
                Cell::new(&endpoint.url).fg(Color::White),
                Cell::new(&endpoint.query_param).fg(Color::DarkGrey),
                Cell::new(endpoint.fields.join(", ")).fg(Color::DarkGrey),
            ]);
        }
    }

    println!("{table}");
    println!();
    println!(
        "  {} provider{} configured, default mode {}",
        style(providers.len()).bold(),
        if providers.len() == 1 { "" } else { "s" },
        style(&state.default_mode).cyan()
    );
    println!();

    Ok(())
}
