use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path, seed: Option<u64>, json: bool) -> Result<(), String> {
    let game = super::open_game(dir, seed)?;
    let stats = game.stats().map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&stats)
            .map_err(|e| format!("cannot serialize stats: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    println!(
        "  {} {}/{} cards ({}%), score {}",
        "Collection".bold(),
        stats.owned_cards,
        stats.total_cards,
        stats.completion_percentage,
        stats.total_score
    );
    if let Some((card, rarity)) = &stats.highest_rarity_card {
        println!("  Best card: {} {} ({})", card.emoji, card.name, super::paint(*rarity));
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Group", "Owned", "Total", "%"]);
    for (theme, s) in &stats.theme_stats {
        table.add_row(vec![
            theme.name().to_string(),
            s.owned.to_string(),
            s.total.to_string(),
            s.percentage.to_string(),
        ]);
    }
    for (rarity, s) in &stats.rarity_stats {
        table.add_row(vec![
            rarity.name().to_string(),
            s.owned.to_string(),
            s.total.to_string(),
            s.percentage.to_string(),
        ]);
    }
    println!("{table}");

    Ok(())
}
