use chrono::TimeDelta;

use crate::rarity::Rarity;

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Alias for `Result<T, GachaError>`.
pub type GachaResult<T> = Result<T, GachaError>;

/// Errors raised by key-value store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded as JSON.
    #[error("JSON error for key '{key}': {source}")]
    Json {
        /// The key being read or written.
        key: String,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// A key contains characters the backend cannot represent.
    #[error("invalid key: \"{0}\"")]
    InvalidKey(String),
}

/// Errors produced by gacha operations.
///
/// Every variant except [`GachaError::Store`] is an expected, recoverable
/// outcome that the caller is meant to present to the player.
#[derive(Debug, thiserror::Error)]
pub enum GachaError {
    /// A draw was attempted with a zero credit balance.
    #[error("no draw credits left")]
    NoCredit,

    /// The catalog holds no card for the sampled rarity.
    #[error("no card in the catalog has base rarity {0}")]
    EmptyDrawPool(Rarity),

    /// The player has never drawn the card.
    #[error("card '{0}' is not in the collection")]
    CardNotOwned(String),

    /// The card is already at the highest rarity.
    #[error("card '{0}' is already at the highest rarity")]
    MaxRarityReached(String),

    /// The card does not have enough copies for its next upgrade.
    #[error("upgrade needs {required} copies, {current} held")]
    InsufficientCopies {
        /// Copies the upgrade consumes.
        required: u32,
        /// Copies currently held.
        current: u32,
    },

    /// The daily credit was already claimed within the cooldown window.
    #[error(
        "daily credit already claimed, next claim in {}h {:02}m",
        .remaining.num_hours(),
        .remaining.num_minutes() % 60
    )]
    CooldownActive {
        /// Time left until the next claim is allowed.
        remaining: TimeDelta,
    },

    /// No card with this id exists in the catalog.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// Copies were removed beyond what the collection holds.
    #[error("cannot remove {requested} copies of '{card_id}', only {held} held")]
    NotEnoughCopies {
        /// The card being decremented.
        card_id: String,
        /// Copies requested for removal.
        requested: u32,
        /// Copies currently held.
        held: u32,
    },

    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The key-value store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
