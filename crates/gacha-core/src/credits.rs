//! The draw-credit economy: balance, cap, and the daily claim cooldown.
//!
//! The cooldown is a rolling window measured from the last claim, not a
//! calendar day. A claim made after several windows have passed pays out one
//! bonus per elapsed window.

use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde_json::Value;

use crate::config::GameConfig;
use crate::error::{GachaError, GachaResult};
use crate::store::{KeyValueStore, KeyValueStoreExt, keys};

/// Outcome of a successful daily claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyClaim {
    /// First claim ever: the cooldown clock starts now and no credit is paid.
    BaselineRecorded,
    /// One bonus per elapsed cooldown period was granted.
    Granted {
        /// Whole cooldown periods since the previous claim (at least one).
        periods: u32,
        /// Credits awarded before the balance cap is applied.
        credits_added: u32,
        /// Balance after the grant.
        total_credits: u32,
    },
}

/// Owns the credit balance and the draw/claim timestamps.
///
/// Holds only configuration: every method takes the store it operates on.
#[derive(Debug, Clone)]
pub struct CreditLedger {
    initial: u32,
    daily_bonus: u32,
    max_stored: u32,
    cooldown: TimeDelta,
}

impl CreditLedger {
    /// Build a ledger from the economy settings.
    pub fn new(config: &GameConfig) -> Self {
        Self {
            initial: config.initial_credits,
            daily_bonus: config.daily_bonus,
            max_stored: config.max_stored_credits,
            cooldown: config.daily_cooldown,
        }
    }

    /// The balance cap.
    pub fn max_stored(&self) -> u32 {
        self.max_stored
    }

    /// The cooldown window length.
    pub fn cooldown(&self) -> TimeDelta {
        self.cooldown
    }

    /// Current balance. A player with no stored balance has the initial grant.
    pub fn balance<S: KeyValueStore + ?Sized>(&self, store: &S) -> GachaResult<u32> {
        Ok(store
            .load::<u32>(keys::CREDITS)?
            .unwrap_or(self.initial)
            .min(self.max_stored))
    }

    /// Whether at least one credit is available.
    pub fn has_credits<S: KeyValueStore + ?Sized>(&self, store: &S) -> GachaResult<bool> {
        Ok(self.balance(store)? > 0)
    }

    /// Add `amount` credits, clamping silently at the cap. Returns the new balance.
    pub fn grant<S: KeyValueStore + ?Sized>(&self, store: &mut S, amount: u32) -> GachaResult<u32> {
        let balance = self
            .balance(store)?
            .saturating_add(amount)
            .min(self.max_stored);
        store.save(keys::CREDITS, &balance)?;
        Ok(balance)
    }

    /// Spend one credit. Returns the new balance.
    pub fn consume_one<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> GachaResult<u32> {
        let balance = self.balance(store)?;
        if balance == 0 {
            return Err(GachaError::NoCredit);
        }
        let remaining = balance - 1;
        store.save(keys::CREDITS, &remaining)?;
        Ok(remaining)
    }

    /// When the player last drew a card.
    pub fn last_draw_time<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> GachaResult<Option<DateTime<Utc>>> {
        read_timestamp(store, keys::LAST_DRAW)
    }

    /// Remember `now` as the last draw time.
    pub fn record_draw_time<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> GachaResult<()> {
        store.save(keys::LAST_DRAW, &now.timestamp_millis())?;
        Ok(())
    }

    /// When the daily credit was last claimed.
    pub fn last_claim<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
    ) -> GachaResult<Option<DateTime<Utc>>> {
        read_timestamp(store, keys::LAST_DAILY_CREDIT)
    }

    /// Whole cooldown periods between the last claim and `now`.
    /// `None` if the player has never claimed.
    pub fn periods_elapsed<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> GachaResult<Option<u32>> {
        let Some(last) = self.last_claim(store)? else {
            return Ok(None);
        };
        let elapsed = (now - last).num_milliseconds();
        let period = self.cooldown.num_milliseconds().max(1);
        let periods = if elapsed <= 0 { 0 } else { elapsed / period };
        Ok(Some(u32::try_from(periods).unwrap_or(u32::MAX)))
    }

    /// Whether a daily claim is allowed at `now`.
    pub fn can_claim_daily<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> GachaResult<bool> {
        Ok(self.periods_elapsed(store, now)?.is_none_or(|p| p >= 1))
    }

    /// Time left until the next claim is allowed, zero if claimable now.
    pub fn time_until_next_claim<S: KeyValueStore + ?Sized>(
        &self,
        store: &S,
        now: DateTime<Utc>,
    ) -> GachaResult<TimeDelta> {
        let Some(last) = self.last_claim(store)? else {
            return Ok(TimeDelta::zero());
        };
        let remaining = last
            .checked_add_signed(self.cooldown)
            .map_or(TimeDelta::MAX, |next| next - now);
        Ok(remaining.max(TimeDelta::zero()))
    }

    /// Claim the daily credit.
    ///
    /// The first claim only starts the cooldown clock. Later claims pay
    /// `daily_bonus` for every full period elapsed and restart the clock at
    /// `now`.
    pub fn claim_daily<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> GachaResult<DailyClaim> {
        let Some(periods) = self.periods_elapsed(store, now)? else {
            self.write_claim(store, now)?;
            tracing::info!("First daily claim, baseline recorded");
            return Ok(DailyClaim::BaselineRecorded);
        };

        if periods == 0 {
            return Err(GachaError::CooldownActive {
                remaining: self.time_until_next_claim(store, now)?,
            });
        }

        let credits_added = self.daily_bonus.saturating_mul(periods);
        let total_credits = self.grant(store, credits_added)?;
        self.write_claim(store, now)?;

        tracing::info!(
            periods,
            credits_added,
            total_credits,
            "Daily credit claimed"
        );

        Ok(DailyClaim::Granted {
            periods,
            credits_added,
            total_credits,
        })
    }

    fn write_claim<S: KeyValueStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Utc>,
    ) -> GachaResult<()> {
        store.save(keys::LAST_DAILY_CREDIT, &now.timestamp_millis())?;
        Ok(())
    }
}

/// Read a timestamp stored as epoch milliseconds.
///
/// Older saves kept the daily claim as a `YYYY-MM-DD` string; those are read
/// as midnight UTC of that date. Anything else is treated as absent.
fn read_timestamp<S: KeyValueStore + ?Sized>(
    store: &S,
    key: &str,
) -> GachaResult<Option<DateTime<Utc>>> {
    let parsed = match store.get(key)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        Some(Value::String(s)) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc()),
        Some(_) => None,
    };
    if parsed.is_none() {
        tracing::warn!("Ignoring malformed timestamp under '{key}'");
    }
    Ok(parsed)
}
