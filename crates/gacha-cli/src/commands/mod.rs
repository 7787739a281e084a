pub mod cards;
pub mod claim;
pub mod debug;
pub mod draw;
pub mod init;
pub mod reset;
pub mod simulate;
pub mod stats;
pub mod status;
pub mod upgrade;

use std::path::Path;

use chrono::TimeDelta;
use colored::{ColoredString, Colorize};

use gacha_core::{GameConfig, JsonFileStore, Rarity};
use gacha_engine::CardGame;

pub type Game = CardGame<JsonFileStore>;

/// Open the saved game in `dir`. The directory must already exist.
fn open_game(dir: &Path, seed: Option<u64>) -> Result<Game, String> {
    if !dir.is_dir() {
        return Err(format!(
            "no game in '{}' (run `gacha init` first)",
            dir.display()
        ));
    }
    create_game(dir, seed)
}

/// Open or create the game in `dir`.
fn create_game(dir: &Path, seed: Option<u64>) -> Result<Game, String> {
    let store = JsonFileStore::open(dir).map_err(|e| format!("cannot open store: {e}"))?;
    let config = match seed {
        Some(seed) => GameConfig::default().with_seed(seed),
        None => GameConfig::default(),
    };
    CardGame::new(store, config).map_err(|e| e.to_string())
}

/// Render a rarity name in its tier colour.
fn paint(rarity: Rarity) -> ColoredString {
    let name = rarity.name();
    match rarity {
        Rarity::Common => name.normal(),
        Rarity::Rare => name.blue(),
        Rarity::VeryRare => name.purple(),
        Rarity::Epic => name.magenta().bold(),
        Rarity::Legendary => name.yellow().bold(),
    }
}

/// Format a duration as `Hh MMm`.
fn hours_minutes(delta: TimeDelta) -> String {
    format!("{}h {:02}m", delta.num_hours(), delta.num_minutes() % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_format() {
        assert_eq!(hours_minutes(TimeDelta::minutes(90)), "1h 30m");
        assert_eq!(hours_minutes(TimeDelta::hours(23) + TimeDelta::minutes(5)), "23h 05m");
        assert_eq!(hours_minutes(TimeDelta::zero()), "0h 00m");
    }
}
