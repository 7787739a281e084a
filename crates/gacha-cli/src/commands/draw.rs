use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use gacha_core::GachaError;

pub fn run(dir: &Path, seed: Option<u64>, count: u32) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;

    let mut drawn = 0;
    for _ in 0..count {
        let result = match game.draw(Utc::now()) {
            Ok(result) => result,
            Err(GachaError::NoCredit) if drawn > 0 => {
                println!("  {}", "Out of credits.".dimmed());
                break;
            }
            Err(e) => return Err(e.to_string()),
        };
        drawn += 1;

        let tag = if result.is_duplicate {
            format!("x{}", result.new_count).dimmed()
        } else {
            "NEW".green().bold()
        };
        println!(
            "  {} {} [{}] {} {}",
            result.card.emoji,
            result.card.name.bold(),
            result.card.id,
            super::paint(result.card.base_rarity),
            tag
        );
    }

    let balance = game.balance().map_err(|e| e.to_string())?;
    println!();
    println!("  {drawn} draw(s), {balance} credit(s) left");

    Ok(())
}
