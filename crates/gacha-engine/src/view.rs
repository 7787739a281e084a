//! Read models joining the catalog with the player's collection.

use std::collections::BTreeMap;

use serde::Serialize;

use gacha_core::{Card, Collection, Rarity, RarityTable, Theme};

use crate::upgrade::{UpgradeEvaluation, evaluate_entry};

/// Narrows a card listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFilter {
    /// Only cards of this theme.
    pub theme: Option<Theme>,
    /// Only cards whose current rarity is this tier.
    pub rarity: Option<Rarity>,
    /// Case-insensitive substring of the name or description.
    pub search: Option<String>,
    /// Only cards with a collection entry.
    pub owned_only: bool,
}

impl CardFilter {
    /// A filter that matches every card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Restrict to one current rarity.
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = Some(rarity);
        self
    }

    /// Restrict to cards matching a search term. Blank terms are ignored.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = (!term.trim().is_empty()).then_some(term);
        self
    }

    /// Restrict to owned cards.
    pub fn owned_only(mut self) -> Self {
        self.owned_only = true;
        self
    }

    /// Whether `view` passes every set criterion.
    pub fn matches(&self, view: &CardView) -> bool {
        self.theme.is_none_or(|t| view.card.theme == t)
            && self.rarity.is_none_or(|r| view.current_rarity == r)
            && self
                .search
                .as_deref()
                .is_none_or(|term| view.card.matches_search(term))
            && (!self.owned_only || view.owned)
    }
}

/// A catalog card together with the player's holding of it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// The catalog entry.
    pub card: Card,
    /// Whether the card has a collection entry.
    pub owned: bool,
    /// Copies held.
    pub count: u32,
    /// Tier the card currently sits at, the lowest tier when unowned.
    pub current_rarity: Rarity,
    /// Points the card scores at its current tier, zero when unowned.
    pub points: u32,
    /// The next upgrade step.
    pub upgrade: UpgradeEvaluation,
}

impl CardView {
    /// Join `card` with its entry in `collection`.
    pub fn build(card: &Card, collection: &Collection, rarities: &RarityTable) -> Self {
        let entry = collection.get(&card.id);
        let current_rarity = entry.map_or(Rarity::lowest(), |e| e.current_rarity);
        Self {
            card: card.clone(),
            owned: entry.is_some(),
            count: entry.map_or(0, |e| e.count),
            current_rarity,
            points: entry.map_or(0, |_| rarities.points(current_rarity)),
            upgrade: evaluate_entry(entry),
        }
    }
}

/// Build views for `cards`, keeping those that pass `filter`.
pub fn card_views(
    cards: &[Card],
    collection: &Collection,
    rarities: &RarityTable,
    filter: &CardFilter,
) -> Vec<CardView> {
    cards
        .iter()
        .map(|card| CardView::build(card, collection, rarities))
        .filter(|view| filter.matches(view))
        .collect()
}

/// Owned-versus-total counts for some slice of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionStats {
    /// Cards in the slice.
    pub total: usize,
    /// Cards in the slice with a collection entry.
    pub owned: usize,
    /// `owned / total` as a rounded whole percent, zero for an empty slice.
    pub percentage: u32,
}

impl CompletionStats {
    fn tally<'a>(cards: impl IntoIterator<Item = &'a Card>, collection: &Collection) -> Self {
        let (total, owned) = cards.into_iter().fold((0, 0), |(total, owned), card| {
            (total + 1, owned + usize::from(collection.contains_key(&card.id)))
        });
        Self {
            total,
            owned,
            percentage: percent(owned, total),
        }
    }
}

/// Collection-wide progress summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionStats {
    /// Cards in the catalog.
    pub total_cards: usize,
    /// Catalog cards with a collection entry.
    pub owned_cards: usize,
    /// Rounded whole percent of the catalog owned.
    pub completion_percentage: u32,
    /// Completion per theme.
    pub theme_stats: BTreeMap<Theme, CompletionStats>,
    /// Completion per base rarity.
    pub rarity_stats: BTreeMap<Rarity, CompletionStats>,
    /// Sum of current-tier points over owned cards.
    pub total_score: u32,
    /// The owned card at the highest current tier, first in catalog order on ties.
    pub highest_rarity_card: Option<(Card, Rarity)>,
}

impl CollectionStats {
    /// Summarise `collection` against the catalog.
    ///
    /// Entries for card ids missing from the catalog are ignored.
    pub fn compute(cards: &[Card], collection: &Collection, rarities: &RarityTable) -> Self {
        let overall = CompletionStats::tally(cards, collection);

        let theme_stats = Theme::ALL
            .iter()
            .map(|&theme| {
                let slice = cards.iter().filter(|c| c.theme == theme);
                (theme, CompletionStats::tally(slice, collection))
            })
            .collect();

        let rarity_stats = Rarity::ALL
            .iter()
            .map(|&rarity| {
                let slice = cards.iter().filter(|c| c.base_rarity == rarity);
                (rarity, CompletionStats::tally(slice, collection))
            })
            .collect();

        let mut total_score = 0u32;
        let mut highest_rarity_card: Option<(Card, Rarity)> = None;
        for card in cards {
            let Some(entry) = collection.get(&card.id) else {
                continue;
            };
            total_score = total_score.saturating_add(rarities.points(entry.current_rarity));
            if highest_rarity_card
                .as_ref()
                .is_none_or(|(_, best)| entry.current_rarity > *best)
            {
                highest_rarity_card = Some((card.clone(), entry.current_rarity));
            }
        }

        Self {
            total_cards: overall.total,
            owned_cards: overall.owned,
            completion_percentage: overall.percentage,
            theme_stats,
            rarity_stats,
            total_score,
            highest_rarity_card,
        }
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as u32
}
