use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use gacha_core::{Rarity, Theme};
use gacha_engine::CardFilter;

pub fn run(
    dir: &Path,
    seed: Option<u64>,
    theme: Option<&str>,
    rarity: Option<&str>,
    search: Option<&str>,
    owned: bool,
    upgradeable: bool,
) -> Result<(), String> {
    let game = super::open_game(dir, seed)?;

    let mut filter = CardFilter::new();
    if let Some(theme) = theme {
        let theme = Theme::parse(theme).ok_or_else(|| format!("unknown theme: {theme}"))?;
        filter = filter.with_theme(theme);
    }
    if let Some(rarity) = rarity {
        let rarity = Rarity::parse(rarity).ok_or_else(|| format!("unknown rarity: {rarity}"))?;
        filter = filter.with_rarity(rarity);
    }
    if let Some(term) = search {
        filter = filter.with_search(term);
    }
    if owned {
        filter = filter.owned_only();
    }

    let mut views = game.cards(&filter).map_err(|e| e.to_string())?;
    if upgradeable {
        views.retain(|v| v.upgrade.can_upgrade);
    }

    if views.is_empty() {
        println!("  No cards found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Card", "Theme", "Base", "Current", "Copies", "Upgrade"]);

    for view in &views {
        let current = if view.owned {
            view.current_rarity.name().to_string()
        } else {
            "-".to_string()
        };
        let upgrade = match (&view.upgrade.reason, view.upgrade.next_rarity) {
            (None, Some(next)) => format!("ready: {next}"),
            (Some(reason), _) if view.owned => reason.to_string(),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            view.card.id.clone(),
            format!("{} {}", view.card.emoji, view.card.name),
            view.card.theme.name().to_string(),
            view.card.base_rarity.name().to_string(),
            current,
            view.count.to_string(),
            upgrade,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", views.len());

    Ok(())
}
