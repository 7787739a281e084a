//! The draw protocol.
//!
//! A draw samples a rarity by weight first and then picks uniformly among the
//! catalog cards whose base rarity matches. Odds per tier therefore stay fixed
//! however many cards each theme adds.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use gacha_core::store::KeyValueStore;
use gacha_core::{
    Card, CollectionStore, CreditLedger, GachaError, GachaResult, Rarity, RarityTable,
};

/// A successful draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    /// The card drawn.
    pub card: Card,
    /// Whether the player already had an entry for this card.
    pub is_duplicate: bool,
    /// Copies held after the draw.
    pub new_count: u32,
    /// Balance after paying for the draw.
    pub credits_remaining: u32,
}

/// Rarity counts from a dry-run of the sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawSimulation {
    /// Number of samples taken.
    pub draws: u32,
    /// Samples that landed on each tier.
    pub counts: BTreeMap<Rarity, u32>,
}

impl DrawSimulation {
    /// Share of samples per tier, rounded to whole percent.
    pub fn percentages(&self) -> BTreeMap<Rarity, u32> {
        self.counts
            .iter()
            .map(|(rarity, count)| {
                let pct = if self.draws == 0 {
                    0
                } else {
                    (f64::from(*count) / f64::from(self.draws) * 100.0).round() as u32
                };
                (*rarity, pct)
            })
            .collect()
    }
}

/// Runs draws against a rarity table.
#[derive(Debug, Clone, Default)]
pub struct GachaEngine {
    rarities: RarityTable,
}

impl GachaEngine {
    /// Create an engine over `rarities`.
    pub fn new(rarities: RarityTable) -> Self {
        Self { rarities }
    }

    /// The rarity table in use.
    pub fn rarities(&self) -> &RarityTable {
        &self.rarities
    }

    /// Spend one credit and draw one card.
    ///
    /// All preconditions (a non-zero balance, a non-empty draw pool, a
    /// readable collection) are checked before anything is written, so a
    /// failed draw leaves the store untouched.
    pub fn draw<S, R>(
        &self,
        store: &mut S,
        ledger: &CreditLedger,
        collection: &CollectionStore,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> GachaResult<DrawResult>
    where
        S: KeyValueStore + ?Sized,
        R: Rng + ?Sized,
    {
        if !ledger.has_credits(store)? {
            return Err(GachaError::NoCredit);
        }

        let rarity = self.rarities.roll(rng);
        let pool: Vec<Card> = collection
            .all_cards(store)?
            .into_iter()
            .filter(|c| c.base_rarity == rarity)
            .collect();
        if pool.is_empty() {
            tracing::error!("Draw pool for {rarity} is empty, catalog is misconfigured");
            return Err(GachaError::EmptyDrawPool(rarity));
        }
        let card = pool[rng.random_range(0..pool.len())].clone();

        let mut owned = collection.collection(store)?;
        let (entry, is_new) = CollectionStore::apply_draw(&mut owned, &card.id, now);

        let credits_remaining = ledger.consume_one(store)?;
        collection.save_collection(store, &owned)?;
        ledger.record_draw_time(store, now)?;

        tracing::info!(
            card = %card.id,
            %rarity,
            count = entry.count,
            credits_remaining,
            "Card drawn"
        );

        Ok(DrawResult {
            card,
            is_duplicate: !is_new,
            new_count: entry.count,
            credits_remaining,
        })
    }

    /// Sample `draws` rarities without spending credits or touching the
    /// collection.
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R, draws: u32) -> DrawSimulation {
        let mut counts: BTreeMap<Rarity, u32> = Rarity::ALL.iter().map(|r| (*r, 0)).collect();
        for _ in 0..draws {
            *counts.entry(self.rarities.roll(rng)).or_insert(0) += 1;
        }
        DrawSimulation { draws, counts }
    }
}
