//! A single handle over store, economy, engines, and RNG.

use chrono::{DateTime, TimeDelta, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;

use gacha_core::store::{KeyValueStore, keys};
use gacha_core::{
    Card, CollectionEntry, CollectionStore, CreditLedger, DailyClaim, GachaError, GachaResult,
    GameConfig, RarityTable,
};

use crate::gacha::{DrawResult, DrawSimulation, GachaEngine};
use crate::upgrade::{UpgradeEngine, UpgradeEvaluation, UpgradeResult};
use crate::view::{CardFilter, CardView, CollectionStats, card_views};

/// A running card game backed by `S`.
///
/// Owns the store for its whole lifetime. Every operation reads state from
/// the store and writes it back before returning, so dropping the game and
/// reopening the same store resumes where it left off.
#[derive(Debug)]
pub struct CardGame<S: KeyValueStore> {
    store: S,
    config: GameConfig,
    ledger: CreditLedger,
    collection: CollectionStore,
    gacha: GachaEngine,
    upgrades: UpgradeEngine,
    rng: StdRng,
}

impl<S: KeyValueStore> CardGame<S> {
    /// Open a game over `store`, seeding the catalog and migrating old
    /// collection records as needed.
    pub fn new(store: S, config: GameConfig) -> GachaResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut game = Self {
            store,
            ledger: CreditLedger::new(&config),
            collection: CollectionStore::new(),
            gacha: GachaEngine::new(RarityTable::standard()),
            upgrades: UpgradeEngine::new(config.excess_card_value),
            config,
            rng,
        };
        game.initialize()?;
        Ok(game)
    }

    fn initialize(&mut self) -> GachaResult<()> {
        self.collection.ensure_catalog(&mut self.store)?;
        self.collection.migrate(&mut self.store)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The settings this game was opened with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give up the game and take back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The rarity table draws are sampled from.
    pub fn rarities(&self) -> &RarityTable {
        self.gacha.rarities()
    }

    // -----------------------------------------------------------------------
    // Draws and upgrades
    // -----------------------------------------------------------------------

    /// Spend one credit on a draw.
    pub fn draw(&mut self, now: DateTime<Utc>) -> GachaResult<DrawResult> {
        self.gacha.draw(
            &mut self.store,
            &self.ledger,
            &self.collection,
            &mut self.rng,
            now,
        )
    }

    /// Sample `draws` rarities without spending anything.
    pub fn simulate_draws(&mut self, draws: u32) -> DrawSimulation {
        self.gacha.simulate(&mut self.rng, draws)
    }

    /// Check the next upgrade for `card_id`.
    pub fn evaluate_upgrade(&self, card_id: &str) -> GachaResult<UpgradeEvaluation> {
        self.upgrades.evaluate(&self.store, &self.collection, card_id)
    }

    /// Upgrade `card_id` by one tier.
    pub fn upgrade(&mut self, card_id: &str) -> GachaResult<UpgradeResult> {
        self.upgrades
            .upgrade(&mut self.store, &self.ledger, &self.collection, card_id)
    }

    /// Views of every card that could be upgraded right now.
    pub fn upgradeable_cards(&self) -> GachaResult<Vec<CardView>> {
        Ok(self
            .cards(&CardFilter::new().owned_only())?
            .into_iter()
            .filter(|view| view.upgrade.can_upgrade)
            .collect())
    }

    /// Whether any card could be upgraded right now.
    pub fn has_upgradeable_cards(&self) -> GachaResult<bool> {
        Ok(!self.upgradeable_cards()?.is_empty())
    }

    // -----------------------------------------------------------------------
    // Credits
    // -----------------------------------------------------------------------

    /// Current draw-credit balance.
    pub fn balance(&self) -> GachaResult<u32> {
        self.ledger.balance(&self.store)
    }

    /// Claim the daily bonus.
    pub fn claim_daily(&mut self, now: DateTime<Utc>) -> GachaResult<DailyClaim> {
        self.ledger.claim_daily(&mut self.store, now)
    }

    /// Whether a daily claim would succeed at `now`.
    pub fn can_claim_daily(&self, now: DateTime<Utc>) -> GachaResult<bool> {
        self.ledger.can_claim_daily(&self.store, now)
    }

    /// Time left before the next daily claim, zero when one is available.
    pub fn time_until_next_claim(&self, now: DateTime<Utc>) -> GachaResult<TimeDelta> {
        self.ledger.time_until_next_claim(&self.store, now)
    }

    /// When the last card was drawn.
    pub fn last_draw_time(&self) -> GachaResult<Option<DateTime<Utc>>> {
        self.ledger.last_draw_time(&self.store)
    }

    /// Add credits outside the normal economy. Returns the new balance.
    pub fn grant_credits(&mut self, amount: u32) -> GachaResult<u32> {
        let balance = self.ledger.grant(&mut self.store, amount)?;
        tracing::info!(amount, balance, "Credits granted");
        Ok(balance)
    }

    // -----------------------------------------------------------------------
    // Catalog and collection
    // -----------------------------------------------------------------------

    /// Every card in the catalog.
    pub fn all_cards(&self) -> GachaResult<Vec<Card>> {
        self.collection.all_cards(&self.store)
    }

    /// A catalog card by id.
    pub fn card(&self, card_id: &str) -> GachaResult<Option<Card>> {
        self.collection.card_by_id(&self.store, card_id)
    }

    /// The collection entry for `card_id`.
    pub fn entry(&self, card_id: &str) -> GachaResult<Option<CollectionEntry>> {
        self.collection.entry(&self.store, card_id)
    }

    /// Add `count` copies of a catalog card without spending credits.
    pub fn give_card(
        &mut self,
        card_id: &str,
        count: u32,
        now: DateTime<Utc>,
    ) -> GachaResult<CollectionEntry> {
        if self.card(card_id)?.is_none() {
            return Err(GachaError::UnknownCard(card_id.to_string()));
        }
        let mut entry = match self.entry(card_id)? {
            Some(entry) => entry,
            None => {
                let mut entry = CollectionEntry::new(card_id, now);
                entry.count = 0;
                entry
            }
        };
        entry.count = entry.count.saturating_add(count);
        self.collection.save_entry(&mut self.store, &entry)?;
        tracing::info!(card = card_id, count, total = entry.count, "Cards given");
        Ok(entry)
    }

    /// Catalog cards joined with collection data, narrowed by `filter`.
    pub fn cards(&self, filter: &CardFilter) -> GachaResult<Vec<CardView>> {
        let cards = self.all_cards()?;
        let collection = self.collection.collection(&self.store)?;
        Ok(card_views(&cards, &collection, self.rarities(), filter))
    }

    /// Collection-wide progress summary.
    pub fn stats(&self) -> GachaResult<CollectionStats> {
        let cards = self.all_cards()?;
        let collection = self.collection.collection(&self.store)?;
        Ok(CollectionStats::compute(&cards, &collection, self.rarities()))
    }

    /// Wipe every persisted key and start over with a fresh catalog.
    pub fn reset(&mut self) -> GachaResult<()> {
        for key in keys::ALL {
            self.store.remove(key)?;
        }
        tracing::warn!("Game state reset");
        self.initialize()
    }
}
