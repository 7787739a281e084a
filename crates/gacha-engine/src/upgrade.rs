//! The rarity-upgrade ladder.
//!
//! An owned card climbs one tier at a time by spending copies held at its
//! current tier. The price doubles per tier, starting at four. Reaching the
//! terminal tier keeps a single copy and converts the surplus into credits.

use serde::Serialize;

use gacha_core::store::KeyValueStore;
use gacha_core::{CollectionEntry, CollectionStore, CreditLedger, GachaError, GachaResult, Rarity};

/// Copies needed to raise a card out of `rarity`, or `None` at the top.
pub fn upgrade_cost(rarity: Rarity) -> Option<u32> {
    if rarity.is_terminal() {
        return None;
    }
    Some(1u32 << (rarity.index() + 2))
}

/// Evaluate the next upgrade for a collection entry, `None` meaning unowned.
pub fn evaluate_entry(entry: Option<&CollectionEntry>) -> UpgradeEvaluation {
    let Some(entry) = entry else {
        return UpgradeEvaluation {
            can_upgrade: false,
            reason: Some(UpgradeBlocker::CardNotOwned),
            cost: None,
            current: 0,
            next_rarity: None,
        };
    };

    let (Some(cost), Some(next)) = (upgrade_cost(entry.current_rarity), entry.current_rarity.next())
    else {
        return UpgradeEvaluation {
            can_upgrade: false,
            reason: Some(UpgradeBlocker::MaxRarityReached),
            cost: None,
            current: entry.count,
            next_rarity: None,
        };
    };

    let reason = (entry.count < cost).then_some(UpgradeBlocker::InsufficientCopies {
        required: cost,
        current: entry.count,
    });

    UpgradeEvaluation {
        can_upgrade: reason.is_none(),
        reason,
        cost: Some(cost),
        current: entry.count,
        next_rarity: Some(next),
    }
}

/// Why an upgrade cannot happen right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum UpgradeBlocker {
    /// The card has never been drawn.
    CardNotOwned,
    /// The card is already at the terminal tier.
    MaxRarityReached,
    /// More copies are needed.
    InsufficientCopies {
        /// Copies the upgrade consumes.
        required: u32,
        /// Copies currently held.
        current: u32,
    },
}

impl std::fmt::Display for UpgradeBlocker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardNotOwned => write!(f, "card not owned"),
            Self::MaxRarityReached => write!(f, "already {}", Rarity::highest()),
            Self::InsufficientCopies { required, current } => {
                write!(f, "needs {required} copies ({current} held)")
            }
        }
    }
}

/// Read-only view of a card's next upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeEvaluation {
    /// Whether [`UpgradeEngine::upgrade`] would succeed.
    pub can_upgrade: bool,
    /// What stands in the way, if anything.
    pub reason: Option<UpgradeBlocker>,
    /// Copies the next upgrade consumes.
    pub cost: Option<u32>,
    /// Copies currently held.
    pub current: u32,
    /// The tier the card would move to.
    pub next_rarity: Option<Rarity>,
}

/// A completed upgrade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeResult {
    /// The card that was upgraded.
    pub card_id: String,
    /// The tier the card moved to.
    pub new_rarity: Rarity,
    /// Copies consumed.
    pub cost: u32,
    /// Copies beyond the cost that were converted on reaching the top tier.
    pub excess_cards: u32,
    /// Credits awarded for those excess copies.
    pub credits_earned: u32,
    /// Copies held after the upgrade.
    pub new_count: u32,
}

/// Evaluates and applies rarity upgrades.
#[derive(Debug, Clone)]
pub struct UpgradeEngine {
    excess_card_value: u32,
}

impl Default for UpgradeEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

impl UpgradeEngine {
    /// Create an engine that pays `excess_card_value` credits per surplus copy.
    pub fn new(excess_card_value: u32) -> Self {
        Self { excess_card_value }
    }

    /// Check whether `card_id` can be upgraded, without changing anything.
    pub fn evaluate<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        collection: &CollectionStore,
        card_id: &str,
    ) -> GachaResult<UpgradeEvaluation> {
        Ok(evaluate_entry(collection.entry(store, card_id)?.as_ref()))
    }

    /// Raise `card_id` one tier.
    ///
    /// Fails with [`GachaError::UnknownCard`] when the card has left the
    /// catalog, even if a collection entry for it remains.
    ///
    /// Below the terminal tier exactly `cost` copies are spent and the rest
    /// are kept. On reaching the terminal tier one copy is kept and every
    /// copy beyond the cost is paid out as credits.
    pub fn upgrade<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        ledger: &CreditLedger,
        collection: &CollectionStore,
        card_id: &str,
    ) -> GachaResult<UpgradeResult> {
        if collection.card_by_id(store, card_id)?.is_none() {
            return Err(GachaError::UnknownCard(card_id.to_string()));
        }
        let evaluation = self.evaluate(store, collection, card_id)?;
        match evaluation.reason {
            Some(UpgradeBlocker::CardNotOwned) => {
                return Err(GachaError::CardNotOwned(card_id.to_string()));
            }
            Some(UpgradeBlocker::MaxRarityReached) => {
                return Err(GachaError::MaxRarityReached(card_id.to_string()));
            }
            Some(UpgradeBlocker::InsufficientCopies { required, current }) => {
                return Err(GachaError::InsufficientCopies { required, current });
            }
            None => {}
        }

        let mut entry = collection
            .entry(store, card_id)?
            .ok_or_else(|| GachaError::CardNotOwned(card_id.to_string()))?;
        let (Some(cost), Some(new_rarity)) = (evaluation.cost, evaluation.next_rarity) else {
            return Err(GachaError::MaxRarityReached(card_id.to_string()));
        };

        let mut excess_cards = 0;
        let mut credits_earned = 0;
        entry.current_rarity = new_rarity;
        if new_rarity.is_terminal() {
            excess_cards = entry.count - cost;
            credits_earned = excess_cards.saturating_mul(self.excess_card_value);
            entry.count = 1;
        } else {
            entry.count -= cost;
        }

        collection.save_entry(store, &entry)?;
        if credits_earned > 0 {
            ledger.grant(store, credits_earned)?;
        }

        tracing::info!(
            card = card_id,
            %new_rarity,
            cost,
            credits_earned,
            "Card upgraded"
        );

        Ok(UpgradeResult {
            card_id: card_id.to_string(),
            new_rarity,
            cost,
            excess_cards,
            credits_earned,
            new_count: entry.count,
        })
    }
}
