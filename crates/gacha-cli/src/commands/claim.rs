use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use gacha_core::DailyClaim;

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;

    match game.claim_daily(Utc::now()).map_err(|e| e.to_string())? {
        DailyClaim::BaselineRecorded => {
            println!("  Daily timer started. Come back in 24h for your first bonus.");
        }
        DailyClaim::Granted {
            periods,
            credits_added,
            total_credits,
        } => {
            let days = if periods == 1 {
                String::new()
            } else {
                format!(" ({periods} days)")
            };
            println!(
                "  {} +{credits_added} credits{days}, balance {total_credits}",
                "Claimed!".green().bold()
            );
        }
    }

    Ok(())
}
