//! Economy settings for a gacha game.

use chrono::TimeDelta;

use crate::error::{GachaError, GachaResult};

/// Tunable economy settings.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Credits a new player starts with.
    pub initial_credits: u32,
    /// Credits granted per elapsed cooldown period on a daily claim.
    pub daily_bonus: u32,
    /// Upper bound on the stored credit balance.
    pub max_stored_credits: u32,
    /// Credits earned per excess copy when a card reaches the terminal tier.
    pub excess_card_value: u32,
    /// Length of one daily-claim cooldown period.
    pub daily_cooldown: TimeDelta,
    /// RNG seed for reproducible draws. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_credits: 5,
            daily_bonus: 5,
            max_stored_credits: 99,
            excess_card_value: 1,
            daily_cooldown: TimeDelta::hours(24),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting balance.
    pub fn with_initial_credits(mut self, credits: u32) -> Self {
        self.initial_credits = credits;
        self
    }

    /// Set the credits granted per daily period.
    pub fn with_daily_bonus(mut self, bonus: u32) -> Self {
        self.daily_bonus = bonus;
        self
    }

    /// Set the balance cap.
    pub fn with_max_stored_credits(mut self, max: u32) -> Self {
        self.max_stored_credits = max;
        self
    }

    /// Set the credit value of one excess terminal-tier copy.
    pub fn with_excess_card_value(mut self, value: u32) -> Self {
        self.excess_card_value = value;
        self
    }

    /// Set the cooldown period length.
    pub fn with_daily_cooldown(mut self, cooldown: TimeDelta) -> Self {
        self.daily_cooldown = cooldown;
        self
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> GachaResult<()> {
        if self.daily_cooldown <= TimeDelta::zero() {
            return Err(GachaError::InvalidConfig(
                "daily cooldown must be positive".to_string(),
            ));
        }
        if self.initial_credits > self.max_stored_credits {
            return Err(GachaError::InvalidConfig(format!(
                "initial credits {} exceed the cap of {}",
                self.initial_credits, self.max_stored_credits
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.initial_credits, 5);
        assert_eq!(cfg.daily_bonus, 5);
        assert_eq!(cfg.max_stored_credits, 99);
        assert_eq!(cfg.excess_card_value, 1);
        assert_eq!(cfg.daily_cooldown, TimeDelta::hours(24));
        assert_eq!(cfg.seed, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_methods() {
        let cfg = GameConfig::default()
            .with_seed(123)
            .with_initial_credits(10)
            .with_daily_bonus(3)
            .with_max_stored_credits(50)
            .with_excess_card_value(2)
            .with_daily_cooldown(TimeDelta::hours(12));
        assert_eq!(cfg.seed, Some(123));
        assert_eq!(cfg.initial_credits, 10);
        assert_eq!(cfg.daily_bonus, 3);
        assert_eq!(cfg.max_stored_credits, 50);
        assert_eq!(cfg.excess_card_value, 2);
        assert_eq!(cfg.daily_cooldown, TimeDelta::hours(12));
    }

    #[test]
    fn validate_rejects_zero_cooldown() {
        let cfg = GameConfig::default().with_daily_cooldown(TimeDelta::zero());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_initial_above_cap() {
        let cfg = GameConfig::default()
            .with_initial_credits(100)
            .with_max_stored_credits(99);
        assert!(cfg.validate().is_err());
    }
}
