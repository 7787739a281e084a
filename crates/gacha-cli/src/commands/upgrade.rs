use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path, seed: Option<u64>, card_id: &str) -> Result<(), String> {
    let mut game = super::open_game(dir, seed)?;
    let card = game
        .card(card_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("unknown card: {card_id}"))?;

    let result = game.upgrade(card_id).map_err(|e| e.to_string())?;

    println!(
        "  {} {} is now {}",
        "Upgraded!".green().bold(),
        card.name.bold(),
        super::paint(result.new_rarity)
    );
    println!("  Spent {} copies, {} left", result.cost, result.new_count);
    if result.credits_earned > 0 {
        println!(
            "  {} extra copies converted into {} credits",
            result.excess_cards, result.credits_earned
        );
    }

    Ok(())
}

pub fn evaluate(dir: &Path, seed: Option<u64>, card_id: &str) -> Result<(), String> {
    let game = super::open_game(dir, seed)?;
    let card = game
        .card(card_id)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("unknown card: {card_id}"))?;
    let eval = game.evaluate_upgrade(card_id).map_err(|e| e.to_string())?;

    println!("  {} [{}]", card.name.bold(), card.id);
    println!("  Copies: {}", eval.current);
    if let (Some(next), Some(cost)) = (eval.next_rarity, eval.cost) {
        println!("  Next:   {} for {cost} copies", super::paint(next));
    }
    match eval.reason {
        None => println!("  {}", "Ready to upgrade".green()),
        Some(reason) => println!("  {} {reason}", "Blocked:".yellow()),
    }

    Ok(())
}
