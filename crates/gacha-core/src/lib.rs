//! Core types for the card gacha: rarity tiers, the card catalog, the credit
//! economy, and the player's collection.
//!
//! Nothing in this crate holds global state. Every persisted value lives in a
//! [`KeyValueStore`] that the caller owns and passes in, so tests can run
//! against a [`MemoryStore`] while the CLI uses a [`JsonFileStore`].

/// Card and theme types.
pub mod card;
/// The default seed catalog.
pub mod catalog;
/// Player collection records layered over a key-value store.
pub mod collection;
/// Tunable economy settings.
pub mod config;
/// Draw-credit balance and daily claim cooldown.
pub mod credits;
/// Error types used throughout the crate.
pub mod error;
/// Ordered rarity tiers with draw weights and point values.
pub mod rarity;
/// The key-value persistence contract and its implementations.
pub mod store;

/// Re-export card types.
pub use card::{Card, Theme};
/// Re-export collection types.
pub use collection::{Collection, CollectionEntry, CollectionStore};
/// Re-export configuration.
pub use config::GameConfig;
/// Re-export credit ledger types.
pub use credits::{CreditLedger, DailyClaim};
/// Re-export error types.
pub use error::{GachaError, GachaResult, StoreError, StoreResult};
/// Re-export rarity types.
pub use rarity::{Rarity, RarityTable, RarityTier};
/// Re-export store types.
pub use store::{JsonFileStore, KeyValueStore, KeyValueStoreExt, MemoryStore};
