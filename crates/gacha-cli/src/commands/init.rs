use std::path::Path;

pub fn run(dir: &Path, seed: Option<u64>) -> Result<(), String> {
    if dir.exists() {
        return Err(format!("directory '{}' already exists", dir.display()));
    }

    let game = super::create_game(dir, seed)?;
    let cards = game.all_cards().map_err(|e| e.to_string())?;
    let balance = game.balance().map_err(|e| e.to_string())?;

    println!("Created game in {}/", dir.display());
    println!("  {} cards in the catalog", cards.len());
    println!("  {balance} draw credits to start");
    println!();
    println!("Get started:");
    println!("  gacha draw        # Spend a credit on a card");
    println!("  gacha claim       # Claim the daily bonus");
    println!("  gacha cards       # Browse the catalog");

    Ok(())
}
