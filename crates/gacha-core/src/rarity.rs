//! Rarity tiers and the weighted draw table.
//!
//! The five tiers are totally ordered from [`Rarity::Common`] to
//! [`Rarity::Legendary`]. A [`RarityTable`] attaches a draw weight and a point
//! value to each tier and samples tiers by cumulative weight.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{GachaError, GachaResult};

/// Tolerance when checking that draw weights sum to one.
pub const WEIGHT_EPSILON: f64 = 1e-9;

/// A rarity tier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// The lowest tier. Every collection entry starts here.
    #[default]
    Common,
    /// Second tier.
    Rare,
    /// Third tier.
    VeryRare,
    /// Fourth tier.
    Epic,
    /// The terminal tier.
    Legendary,
}

impl Rarity {
    /// All tiers, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::VeryRare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Position of this tier in [`Rarity::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::Common => 0,
            Self::Rare => 1,
            Self::VeryRare => 2,
            Self::Epic => 3,
            Self::Legendary => 4,
        }
    }

    /// The tier at `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The next-higher tier, or `None` at the top.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The next-lower tier, or `None` at the bottom.
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// The lowest tier.
    pub fn lowest() -> Self {
        Self::Common
    }

    /// The terminal tier.
    pub fn highest() -> Self {
        Self::Legendary
    }

    /// Whether no tier lies above this one.
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Storage key, e.g. `very_rare`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::VeryRare => "very_rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::VeryRare => "Very Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    /// Badge shown next to the tier name.
    pub fn emoji(self) -> &'static str {
        match self {
            Self::Common => "🤍",
            Self::Rare => "💙",
            Self::VeryRare => "💚",
            Self::Epic => "💛",
            Self::Legendary => "❤️",
        }
    }

    /// Parse a tier from a key or name, ignoring case, spaces, and dashes.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "very_rare" | "veryrare" => Some(Self::VeryRare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Draw weight and point value for one tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RarityTier {
    /// The tier this row describes.
    pub rarity: Rarity,
    /// Probability of drawing this tier.
    pub weight: f64,
    /// Score awarded for a card held at this tier.
    pub points: u32,
}

/// Ordered rarity tiers with draw weights that sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityTable {
    tiers: Vec<RarityTier>,
}

impl RarityTable {
    /// Build a table from one row per tier, lowest first.
    ///
    /// Fails when the rows do not cover every tier in order, when a weight is
    /// negative, or when the weights do not sum to one.
    pub fn new(tiers: Vec<RarityTier>) -> GachaResult<Self> {
        if tiers.len() != Rarity::ALL.len() {
            return Err(GachaError::InvalidConfig(format!(
                "expected {} rarity tiers, got {}",
                Rarity::ALL.len(),
                tiers.len()
            )));
        }
        for (tier, expected) in tiers.iter().zip(Rarity::ALL) {
            if tier.rarity != expected {
                return Err(GachaError::InvalidConfig(format!(
                    "rarity tiers out of order: expected {expected}, found {}",
                    tier.rarity
                )));
            }
            if tier.weight.is_nan() || tier.weight < 0.0 {
                return Err(GachaError::InvalidConfig(format!(
                    "weight for {} must be non-negative",
                    tier.rarity
                )));
            }
        }
        let sum: f64 = tiers.iter().map(|t| t.weight).sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(GachaError::InvalidConfig(format!(
                "rarity weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(Self { tiers })
    }

    /// The standard table: 60 / 25 / 10 / 4 / 1 percent, points doubling per tier.
    pub fn standard() -> Self {
        let row = |rarity, weight, points| RarityTier {
            rarity,
            weight,
            points,
        };
        Self {
            tiers: vec![
                row(Rarity::Common, 0.60, 1),
                row(Rarity::Rare, 0.25, 2),
                row(Rarity::VeryRare, 0.10, 4),
                row(Rarity::Epic, 0.04, 8),
                row(Rarity::Legendary, 0.01, 16),
            ],
        }
    }

    /// All rows, lowest tier first.
    pub fn tiers(&self) -> &[RarityTier] {
        &self.tiers
    }

    /// The row for `rarity`.
    pub fn tier(&self, rarity: Rarity) -> &RarityTier {
        &self.tiers[rarity.index()]
    }

    /// Draw weight of `rarity`.
    pub fn weight(&self, rarity: Rarity) -> f64 {
        self.tier(rarity).weight
    }

    /// Point value of `rarity`.
    pub fn points(&self, rarity: Rarity) -> u32 {
        self.tier(rarity).points
    }

    /// Position of `rarity` in the table.
    pub fn index_of(&self, rarity: Rarity) -> usize {
        rarity.index()
    }

    /// The tier above `rarity`, or `None` at the ceiling.
    pub fn next(&self, rarity: Rarity) -> Option<Rarity> {
        rarity.next()
    }

    /// The tier below `rarity`, or `None` at the floor.
    pub fn previous(&self, rarity: Rarity) -> Option<Rarity> {
        rarity.previous()
    }

    /// The first row's tier.
    pub fn lowest(&self) -> Rarity {
        self.tiers.first().map_or(Rarity::lowest(), |t| t.rarity)
    }

    /// The last row's tier.
    pub fn highest(&self) -> Rarity {
        self.tiers.last().map_or(Rarity::highest(), |t| t.rarity)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.tiers.iter().map(|t| t.weight).sum()
    }

    /// Map a uniform value in `[0, 1)` to a tier.
    ///
    /// Walks the tiers in order and returns the first one whose cumulative
    /// weight reaches `u`. If rounding leaves the final sum just under `u`,
    /// the lowest tier is returned.
    pub fn sample(&self, u: f64) -> Rarity {
        let mut cumulative = 0.0;
        for tier in &self.tiers {
            cumulative += tier.weight;
            if u <= cumulative {
                return tier.rarity;
            }
        }
        Rarity::lowest()
    }

    /// Sample a tier with the given RNG.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Rarity {
        self.sample(rng.random::<f64>())
    }
}

impl Default for RarityTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ordering_is_total() {
        for pair in Rarity::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert_eq!(pair[1].previous(), Some(pair[0]));
        }
        assert_eq!(Rarity::Legendary.next(), None);
        assert_eq!(Rarity::Common.previous(), None);
        assert!(Rarity::Legendary.is_terminal());
        assert!(!Rarity::Epic.is_terminal());
    }

    #[test]
    fn index_round_trips() {
        for rarity in Rarity::ALL {
            assert_eq!(Rarity::from_index(rarity.index()), Some(rarity));
        }
        assert_eq!(Rarity::from_index(5), None);
    }

    #[test]
    fn parse_accepts_keys_and_names() {
        assert_eq!(Rarity::parse("common"), Some(Rarity::Common));
        assert_eq!(Rarity::parse("Very Rare"), Some(Rarity::VeryRare));
        assert_eq!(Rarity::parse("very-rare"), Some(Rarity::VeryRare));
        assert_eq!(Rarity::parse("very_rare"), Some(Rarity::VeryRare));
        assert_eq!(Rarity::parse("LEGENDARY"), Some(Rarity::Legendary));
        assert_eq!(Rarity::parse("mythic"), None);
    }

    #[test]
    fn serde_uses_snake_case_keys() {
        let json = serde_json::to_string(&Rarity::VeryRare).unwrap();
        assert_eq!(json, "\"very_rare\"");
        let back: Rarity = serde_json::from_str("\"epic\"").unwrap();
        assert_eq!(back, Rarity::Epic);
    }

    #[test]
    fn standard_weights_sum_to_one() {
        let table = RarityTable::standard();
        assert!((table.total_weight() - 1.0).abs() < WEIGHT_EPSILON);
        assert!(RarityTable::new(table.tiers().to_vec()).is_ok());
    }

    #[test]
    fn points_double_per_tier() {
        let table = RarityTable::standard();
        let points: Vec<u32> = Rarity::ALL.iter().map(|r| table.points(*r)).collect();
        assert_eq!(points, vec![1, 2, 4, 8, 16]);
    }

    #[test]
    fn table_navigation() {
        let table = RarityTable::standard();
        assert_eq!(table.lowest(), Rarity::Common);
        assert_eq!(table.highest(), Rarity::Legendary);
        assert_eq!(table.next(Rarity::Epic), Some(Rarity::Legendary));
        assert_eq!(table.next(Rarity::Legendary), None);
        assert_eq!(table.previous(Rarity::Rare), Some(Rarity::Common));
        assert_eq!(table.previous(Rarity::Common), None);
        assert_eq!(table.index_of(Rarity::VeryRare), 2);
    }

    #[test]
    fn new_rejects_bad_sum() {
        let mut tiers = RarityTable::standard().tiers().to_vec();
        tiers[0].weight = 0.5;
        assert!(matches!(
            RarityTable::new(tiers),
            Err(GachaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn new_rejects_wrong_order() {
        let mut tiers = RarityTable::standard().tiers().to_vec();
        tiers.swap(0, 1);
        assert!(RarityTable::new(tiers).is_err());
    }

    #[test]
    fn new_rejects_missing_tier() {
        let mut tiers = RarityTable::standard().tiers().to_vec();
        tiers.pop();
        assert!(RarityTable::new(tiers).is_err());
    }

    #[test]
    fn sample_boundaries() {
        let table = RarityTable::standard();
        assert_eq!(table.sample(0.0), Rarity::Common);
        assert_eq!(table.sample(0.59), Rarity::Common);
        assert_eq!(table.sample(0.61), Rarity::Rare);
        assert_eq!(table.sample(0.84), Rarity::Rare);
        assert_eq!(table.sample(0.90), Rarity::VeryRare);
        assert_eq!(table.sample(0.97), Rarity::Epic);
        assert_eq!(table.sample(0.995), Rarity::Legendary);
    }

    #[test]
    fn sample_falls_back_to_lowest_on_drift() {
        let table = RarityTable::standard();
        assert_eq!(table.sample(1.5), Rarity::Common);
    }

    #[test]
    fn roll_frequencies_match_weights() {
        let table = RarityTable::standard();
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 100_000;
        let mut counts = [0u32; 5];
        for _ in 0..trials {
            counts[table.roll(&mut rng).index()] += 1;
        }
        for tier in table.tiers() {
            let observed = f64::from(counts[tier.rarity.index()]) / f64::from(trials);
            assert!(
                (observed - tier.weight).abs() < 0.01,
                "{}: observed {observed}, expected {}",
                tier.rarity,
                tier.weight
            );
        }
    }
}
