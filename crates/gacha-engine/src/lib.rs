//! Draw and upgrade engines for the card gacha.
//!
//! [`GachaEngine`] turns one credit into one card, [`UpgradeEngine`] walks an
//! owned card up the rarity ladder, and [`CardGame`] wires both to a store,
//! a credit ledger, and a seeded RNG behind a single handle.

pub mod gacha;
pub mod game;
pub mod upgrade;
pub mod view;

pub use gacha::{DrawResult, DrawSimulation, GachaEngine};
pub use game::CardGame;
pub use upgrade::{
    UpgradeBlocker, UpgradeEngine, UpgradeEvaluation, UpgradeResult, evaluate_entry, upgrade_cost,
};
pub use view::{CardFilter, CardView, CollectionStats, CompletionStats};
