use serde::{Deserialize, Serialize};

use crate::rarity::Rarity;

/// A card theme. Each theme groups a fixed set of catalog cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    /// Blocks, mobs, and ores.
    Minecraft,
    /// Planets, stars, and other astronomy.
    Space,
    /// Prehistoric creatures.
    Dinosaurs,
}

impl Theme {
    /// All themes in display order.
    pub const ALL: [Theme; 3] = [Theme::Minecraft, Theme::Space, Theme::Dinosaurs];

    /// Storage key, e.g. `dinosaurs`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Minecraft => "minecraft",
            Self::Space => "space",
            Self::Dinosaurs => "dinosaurs",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Minecraft => "Minecraft",
            Self::Space => "Astronomy",
            Self::Dinosaurs => "Dinosaurs",
        }
    }

    /// Badge shown next to the theme name.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Minecraft => "🟫",
            Self::Space => "🌌",
            Self::Dinosaurs => "🦕",
        }
    }

    /// Parse a theme from its key or display name (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.key() == lower || t.name().to_lowercase() == lower)
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A catalog card. Cards are seed data and never change once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier, e.g. `mc_01`.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The theme this card belongs to.
    pub theme: Theme,
    /// The draw pool this card sits in.
    ///
    /// This does not cap upgrades: any owned card can reach the terminal tier.
    pub base_rarity: Rarity,
    /// Flavor text.
    pub description: String,
    /// Fallback glyph when no image is available.
    #[serde(default)]
    pub emoji: String,
    /// Relative path to the card artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    /// Create a card without artwork.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        theme: Theme,
        base_rarity: Rarity,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            theme,
            base_rarity,
            description: String::new(),
            emoji: String::new(),
            image: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the fallback glyph.
    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    /// Set the artwork path.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Case-insensitive match against the name or description.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse() {
        assert_eq!(Theme::parse("space"), Some(Theme::Space));
        assert_eq!(Theme::parse("Astronomy"), Some(Theme::Space));
        assert_eq!(Theme::parse("MINECRAFT"), Some(Theme::Minecraft));
        assert_eq!(Theme::parse("pirates"), None);
    }

    #[test]
    fn card_serializes_camel_case() {
        let card = Card::new("mc_01", "Creeper", Theme::Minecraft, Rarity::Common)
            .with_emoji("💚")
            .with_image("images/creeper.webp");
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["baseRarity"], "common");
        assert_eq!(json["theme"], "minecraft");
        assert_eq!(json["image"], "images/creeper.webp");
    }

    #[test]
    fn card_without_image_omits_field() {
        let card = Card::new("x", "X", Theme::Space, Rarity::Epic);
        let json = serde_json::to_value(&card).unwrap();
        assert!(json.get("image").is_none());
        let back: Card = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn search_matches_name_and_description() {
        let card = Card::new("space_02", "Moon", Theme::Space, Rarity::Common)
            .with_description("Natural satellite of the Earth.");
        assert!(card.matches_search("moon"));
        assert!(card.matches_search("SATELLITE"));
        assert!(!card.matches_search("comet"));
    }
}
