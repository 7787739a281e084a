//! The card catalog and the player's collection, layered over a key-value store.
//!
//! The collection is persisted as a single JSON object mapping card id to
//! [`CollectionEntry`]. Every mutation is a read-modify-write of that object.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::card::{Card, Theme};
use crate::catalog::default_catalog;
use crate::error::{GachaError, GachaResult, StoreError};
use crate::rarity::Rarity;
use crate::store::{KeyValueStore, KeyValueStoreExt, keys};

/// The player's collection, keyed by card id.
pub type Collection = BTreeMap<String, CollectionEntry>;

/// One card the player has drawn at least once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    /// The catalog card this entry tracks.
    #[serde(default)]
    pub card_id: String,
    /// Copies held at the current rarity.
    pub count: u32,
    /// The tier the held copies are at. Starts at the lowest tier.
    #[serde(default)]
    pub current_rarity: Rarity,
    /// When the card was first drawn.
    #[serde(
        rename = "firstObtained",
        with = "chrono::serde::ts_milliseconds",
        default
    )]
    pub first_obtained_at: DateTime<Utc>,
}

impl CollectionEntry {
    /// A freshly drawn card: one copy at the lowest tier.
    pub fn new(card_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            card_id: card_id.into(),
            count: 1,
            current_rarity: Rarity::lowest(),
            first_obtained_at: now,
        }
    }
}

/// Data access for the catalog and collection.
///
/// Holds no state of its own: every method takes the store it operates on.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollectionStore;

impl CollectionStore {
    /// Create a collection accessor.
    pub fn new() -> Self {
        Self
    }

    // -----------------------------------------------------------------------
    // Catalog
    // -----------------------------------------------------------------------

    /// Every card in the catalog. Empty if no catalog has been stored.
    pub fn all_cards<S: KeyValueStore + ?Sized>(&self, store: &S) -> GachaResult<Vec<Card>> {
        Ok(store.load::<Vec<Card>>(keys::CATALOG)?.unwrap_or_default())
    }

    /// Replace the stored catalog.
    pub fn save_catalog<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        cards: &[Card],
    ) -> GachaResult<()> {
        store.save(keys::CATALOG, cards)?;
        Ok(())
    }

    /// Cards belonging to `theme`.
    pub fn cards_by_theme<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        theme: Theme,
    ) -> GachaResult<Vec<Card>> {
        let mut cards = self.all_cards(store)?;
        cards.retain(|c| c.theme == theme);
        Ok(cards)
    }

    /// Look up a catalog card by id.
    pub fn card_by_id<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        card_id: &str,
    ) -> GachaResult<Option<Card>> {
        Ok(self
            .all_cards(store)?
            .into_iter()
            .find(|c| c.id == card_id))
    }

    /// Seed the default catalog if the stored one is missing, empty, or
    /// unreadable. Returns whether the catalog was (re)written.
    pub fn ensure_catalog<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> GachaResult<bool> {
        let needs_seed = match self.all_cards(store) {
            Ok(cards) => cards.is_empty(),
            Err(GachaError::Store(StoreError::Json { source, .. })) => {
                tracing::warn!("Stored catalog is unreadable ({source}), reseeding");
                true
            }
            Err(e) => return Err(e),
        };
        if needs_seed {
            let cards = default_catalog();
            tracing::info!("Seeding catalog with {} cards", cards.len());
            self.save_catalog(store, &cards)?;
        }
        Ok(needs_seed)
    }

    // -----------------------------------------------------------------------
    // Collection
    // -----------------------------------------------------------------------

    /// The whole collection.
    pub fn collection<S: KeyValueStore + ?Sized>(&self, store: &S) -> GachaResult<Collection> {
        let mut collection = store
            .load::<Collection>(keys::COLLECTION)?
            .unwrap_or_default();
        for (card_id, entry) in &mut collection {
            if entry.card_id.is_empty() {
                entry.card_id.clone_from(card_id);
            }
        }
        Ok(collection)
    }

    /// Replace the whole collection.
    pub fn save_collection<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        collection: &Collection,
    ) -> GachaResult<()> {
        store.save(keys::COLLECTION, collection)?;
        Ok(())
    }

    /// Fill in fields that older collection records lack and make sure a
    /// collection object exists. Returns how many entries were patched.
    pub fn migrate<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> GachaResult<usize> {
        let Some(mut raw) = store.get(keys::COLLECTION)? else {
            self.save_collection(store, &Collection::new())?;
            return Ok(0);
        };

        let mut patched = 0;
        if let Value::Object(entries) = &mut raw {
            for entry in entries.values_mut() {
                let Value::Object(fields) = entry else {
                    continue;
                };
                if !fields.contains_key("currentRarity") {
                    fields.insert(
                        "currentRarity".to_string(),
                        Value::String(Rarity::lowest().key().to_string()),
                    );
                    patched += 1;
                }
            }
        }

        if patched > 0 {
            tracing::info!("Migrated {patched} collection entries");
            store.set(keys::COLLECTION, raw)?;
        }
        Ok(patched)
    }

    /// The entry for `card_id`, if the card has ever been drawn.
    pub fn entry<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        card_id: &str,
    ) -> GachaResult<Option<CollectionEntry>> {
        Ok(self.collection(store)?.remove(card_id))
    }

    /// Write a single entry, replacing any existing one for the same card.
    pub fn save_entry<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        entry: &CollectionEntry,
    ) -> GachaResult<()> {
        let mut collection = self.collection(store)?;
        collection.insert(entry.card_id.clone(), entry.clone());
        self.save_collection(store, &collection)
    }

    /// Add one drawn copy of `card_id`.
    ///
    /// Returns the updated entry and whether this was the card's first
    /// acquisition.
    pub fn record_draw<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        card_id: &str,
        now: DateTime<Utc>,
    ) -> GachaResult<(CollectionEntry, bool)> {
        let mut collection = self.collection(store)?;
        let (entry, is_new) = Self::apply_draw(&mut collection, card_id, now);
        self.save_collection(store, &collection)?;
        Ok((entry, is_new))
    }

    /// Add one drawn copy of `card_id` to an already loaded collection.
    ///
    /// Nothing is written; callers save the collection themselves.
    pub fn apply_draw(
        collection: &mut Collection,
        card_id: &str,
        now: DateTime<Utc>,
    ) -> (CollectionEntry, bool) {
        match collection.get_mut(card_id) {
            Some(entry) => {
                entry.count = entry.count.saturating_add(1);
                (entry.clone(), false)
            }
            None => {
                let entry = CollectionEntry::new(card_id, now);
                collection.insert(card_id.to_string(), entry.clone());
                (entry, true)
            }
        }
    }

    /// Set the current rarity of an owned card.
    pub fn set_rarity<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        card_id: &str,
        rarity: Rarity,
    ) -> GachaResult<CollectionEntry> {
        self.update(store, card_id, |entry| entry.current_rarity = rarity)
    }

    /// Set the copy count of an owned card.
    pub fn set_count<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        card_id: &str,
        count: u32,
    ) -> GachaResult<CollectionEntry> {
        self.update(store, card_id, |entry| entry.count = count)
    }

    /// Remove `count` copies of a card, deleting the entry when none remain.
    ///
    /// Returns the copies left.
    pub fn remove_copies<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        card_id: &str,
        count: u32,
    ) -> GachaResult<u32> {
        let mut collection = self.collection(store)?;
        let entry = collection
            .get_mut(card_id)
            .ok_or_else(|| GachaError::CardNotOwned(card_id.to_string()))?;
        if entry.count < count {
            return Err(GachaError::NotEnoughCopies {
                card_id: card_id.to_string(),
                requested: count,
                held: entry.count,
            });
        }

        entry.count -= count;
        let remaining = entry.count;
        if remaining == 0 {
            collection.remove(card_id);
        }
        self.save_collection(store, &collection)?;
        Ok(remaining)
    }

    /// Number of distinct cards with an entry.
    pub fn cards_owned<S: KeyValueStore + ?Sized>(&self, store: &S) -> GachaResult<usize> {
        Ok(self.collection(store)?.len())
    }

    /// Whether the player holds at least one copy of `card_id`.
    pub fn has_card<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        card_id: &str,
    ) -> GachaResult<bool> {
        Ok(self.card_count(store, card_id)? > 0)
    }

    /// Copies held of `card_id`, zero if never drawn.
    pub fn card_count<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        card_id: &str,
    ) -> GachaResult<u32> {
        Ok(self.entry(store, card_id)?.map_or(0, |e| e.count))
    }

    /// Current rarity of `card_id`, the lowest tier if never drawn.
    pub fn current_rarity<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        card_id: &str,
    ) -> GachaResult<Rarity> {
        Ok(self
            .entry(store, card_id)?
            .map_or(Rarity::lowest(), |e| e.current_rarity))
    }

    fn update<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        card_id: &str,
        apply: impl FnOnce(&mut CollectionEntry),
    ) -> GachaResult<CollectionEntry> {
        let mut collection = self.collection(store)?;
        let entry = collection
            .get_mut(card_id)
            .ok_or_else(|| GachaError::CardNotOwned(card_id.to_string()))?;
        apply(entry);
        let updated = entry.clone();
        self.save_collection(store, &collection)?;
        Ok(updated)
    }
}
