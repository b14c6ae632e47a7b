/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// HP (and max HP) of a fresh player.
    pub starting_hp: u32,
    /// Energy refilled at the start of every player turn.
    pub starting_energy: u32,
    /// Cards drawn at combat start and at the start of each player turn.
    pub hand_size: usize,
    /// Hard cap on cards held; draws stop once reached.
    pub max_hand_size: usize,
    /// Upper clamp applied by the energy mutator (not by card effects).
    pub max_energy: u32,
    /// Fraction of max HP restored when resting.
    pub rest_heal_fraction: f64,
    /// Divine Favor charged for removing a card at a shop.
    pub shop_removal_cost: u32,
    pub map: MapConfig,
}

impl GameConfig {
    pub const DEFAULT_STARTING_HP: u32 = 80;
    pub const DEFAULT_STARTING_ENERGY: u32 = 3;
    pub const DEFAULT_HAND_SIZE: usize = 5;
    pub const DEFAULT_MAX_HAND_SIZE: usize = 10;
    pub const DEFAULT_MAX_ENERGY: u32 = 10;
    pub const DEFAULT_REST_HEAL_FRACTION: f64 = 0.3;
    pub const DEFAULT_SHOP_REMOVAL_COST: u32 = 75;

    pub fn new() -> Self {
        Self {
            starting_hp: Self::DEFAULT_STARTING_HP,
            starting_energy: Self::DEFAULT_STARTING_ENERGY,
            hand_size: Self::DEFAULT_HAND_SIZE,
            max_hand_size: Self::DEFAULT_MAX_HAND_SIZE,
            max_energy: Self::DEFAULT_MAX_ENERGY,
            rest_heal_fraction: Self::DEFAULT_REST_HEAL_FRACTION,
            shop_removal_cost: Self::DEFAULT_SHOP_REMOVAL_COST,
            map: MapConfig::default(),
        }
    }

    /// HP restored by a rest: `floor(max_hp * rest_heal_fraction)`.
    pub fn rest_heal_amount(&self, max_hp: u32) -> u32 {
        (f64::from(max_hp) * self.rest_heal_fraction).floor() as u32
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape of a generated act map.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapConfig {
    /// Grid width.
    pub columns: u32,
    /// Floors before the boss. The boss occupies the implicit row `rows`.
    pub rows: u32,
    /// Requested starting paths (deduplicated, then topped up to `MIN_PATHS`).
    pub path_count: u32,
    /// Probability of adding each eligible cross-connection.
    pub cross_link_chance: f64,
    /// Probability of forcing the row two floors before the boss to elite.
    pub pre_boss_elite_chance: f64,
}

impl MapConfig {
    /// Minimum number of distinct starting columns.
    pub const MIN_PATHS: usize = 3;

    /// Column the boss sits in; every path converges here.
    pub fn boss_column(&self) -> u32 {
        self.columns / 2
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            columns: 7,
            rows: 15,
            path_count: 6,
            cross_link_chance: 0.3,
            pre_boss_elite_chance: 0.5,
        }
    }
}
