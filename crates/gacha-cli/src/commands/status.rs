use std::path::Path;

use chrono::Utc;
use colored::Colorize;

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let game = super::open_game(dir, seed)?;
    let now = Utc::now();

    let balance = game.balance().map_err(|e| e.to_string())?;
    let max = game.config().max_stored_credits;
    let stats = game.stats().map_err(|e| e.to_string())?;
    let upgradeable = game.upgradeable_cards().map_err(|e| e.to_string())?;

    println!("  {}", "Status".bold());
    println!("  Credits:     {balance}/{max}");

    if game.can_claim_daily(now).map_err(|e| e.to_string())? {
        println!("  Daily bonus: {}", "available".green());
    } else {
        let wait = game.time_until_next_claim(now).map_err(|e| e.to_string())?;
        println!("  Daily bonus: in {}", super::hours_minutes(wait));
    }

    println!(
        "  Collection:  {}/{} ({}%)",
        stats.owned_cards, stats.total_cards, stats.completion_percentage
    );
    println!("  Score:       {}", stats.total_score);

    if let Some(last) = game.last_draw_time().map_err(|e| e.to_string())? {
        println!(
            "  Last draw:   {}",
            last.format("%Y-%m-%d %H:%M UTC").to_string().dimmed()
        );
    }

    if !upgradeable.is_empty() {
        println!();
        println!("  {} card(s) ready to upgrade:", upgradeable.len());
        for view in &upgradeable {
            println!("    {} {}", view.card.id, view.card.name);
        }
    }

    Ok(())
}
