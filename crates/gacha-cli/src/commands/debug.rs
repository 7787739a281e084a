//! Debug commands that bypass the normal economy.

use std::path::Path;

use chrono::Utc;

pub fn grant(dir: &Path, seed: Option<u64>, amount: u32) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;
    let balance = game.grant_credits(amount).map_err(|e| e.to_string())?;
    println!("  Granted {amount} credits, balance {balance}");
    Ok(())
}

pub fn give(dir: &Path, seed: Option<u64>, card_id: &str, count: u32) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;
    let entry = game
        .give_card(card_id, count, Utc::now())
        .map_err(|e| e.to_string())?;
    println!("  Gave {count} x {card_id}, now holding {}", entry.count);
    Ok(())
}
