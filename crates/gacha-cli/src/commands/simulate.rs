use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path, seed: Option<u64>, draws: u32) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;
    let sim = game.simulate_draws(draws);
    let percentages = sim.percentages();

    println!(
        "  {} {}",
        "Simulation".bold(),
        format!("({draws} draws, no credits spent)").dimmed()
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Rarity", "Draws", "Observed %", "Expected %"]);
    for tier in game.rarities().tiers() {
        table.add_row(vec![
            tier.rarity.name().to_string(),
            sim.counts.get(&tier.rarity).copied().unwrap_or(0).to_string(),
            percentages
                .get(&tier.rarity)
                .copied()
                .unwrap_or(0)
                .to_string(),
            format!("{:.0}", tier.weight * 100.0),
        ]);
    }
    println!("{table}");

    Ok(())
}
