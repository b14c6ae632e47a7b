//! Enemy definitions, intents, and live instances.

use super::ids::EnemyInstanceId;
use super::status::{StatusEffects, StatusKind};

/// One step of an enemy's cyclic behaviour pattern.
///
/// The resolver interprets the damage-dealing and block variants. Status
/// carrying variants are resolved as data only: the attached status is a
/// content hook and is not applied by the core.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Intent {
    Attack {
        damage: u32,
        #[cfg_attr(feature = "serde", serde(default = "super::default_times"))]
        times: u32,
    },
    HeavyAttack {
        damage: u32,
        #[cfg_attr(feature = "serde", serde(default = "super::default_times"))]
        times: u32,
    },
    /// A single hit that also carries a debuff for the player.
    AttackDebuff {
        damage: u32,
        status: StatusKind,
        duration: u32,
    },
    /// A single hit that also carries a buff for the attacker.
    AttackBuff {
        damage: u32,
        status: StatusKind,
        duration: u32,
    },
    Defend {
        block: u32,
    },
    Buff {
        status: StatusKind,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: u32,
    },
    Debuff {
        status: StatusKind,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: u32,
    },
    Summon {
        enemy_id: String,
    },
    Heal {
        amount: u32,
    },
    Unknown,
}

impl Intent {
    pub fn attack(damage: u32) -> Self {
        Self::Attack { damage, times: 1 }
    }

    pub fn multi_attack(damage: u32, times: u32) -> Self {
        Self::Attack { damage, times }
    }

    pub fn heavy_attack(damage: u32) -> Self {
        Self::HeavyAttack { damage, times: 1 }
    }

    pub fn defend(block: u32) -> Self {
        Self::Defend { block }
    }

    /// Total damage the intent would deal before mitigation.
    ///
    /// Presentation layers use this to preview incoming damage.
    pub fn total_damage(&self) -> u32 {
        match self {
            Self::Attack { damage, times } | Self::HeavyAttack { damage, times } => {
                damage.saturating_mul((*times).max(1))
            }
            Self::AttackDebuff { damage, .. } | Self::AttackBuff { damage, .. } => *damage,
            _ => 0,
        }
    }

    pub fn is_attack(&self) -> bool {
        self.total_damage() > 0
    }
}

/// Rewards granted when the enemy is defeated.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LootTable {
    pub divine_favor: u32,
    /// Probability of dropping one Adamant Shard.
    pub adamant_shard_chance: f64,
    pub card_reward: bool,
    pub artifact_chance: f64,
}

impl LootTable {
    pub fn favor(divine_favor: u32) -> Self {
        Self {
            divine_favor,
            ..Self::default()
        }
    }
}

/// Immutable enemy template keyed by `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    pub max_hp: u32,
    pub pattern: Vec<Intent>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: LootTable,
    #[cfg_attr(feature = "serde", serde(default = "default_act"))]
    pub act: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elite: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

#[cfg(feature = "serde")]
const fn default_act() -> u32 {
    1
}

/// A live enemy in combat.
///
/// Dead enemies (hp 0) stay in the enemy list until combat ends; they are
/// skipped for targeting and intent resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyInstance {
    pub id: EnemyInstanceId,
    pub definition: EnemyDefinition,
    pub hp: u32,
    pub block: u32,
    pub statuses: StatusEffects,
    /// Cursor into `definition.pattern`, always `< pattern.len()` when the
    /// pattern is non-empty.
    pub intent_index: usize,
}

impl EnemyInstance {
    /// Spawns a fresh instance at full HP with the cursor on the first intent.
    pub fn spawn(id: EnemyInstanceId, definition: EnemyDefinition) -> Self {
        Self {
            id,
            hp: definition.max_hp,
            definition,
            block: 0,
            statuses: StatusEffects::new(),
            intent_index: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn max_hp(&self) -> u32 {
        self.definition.max_hp
    }

    pub fn current_intent(&self) -> Option<&Intent> {
        self.definition.pattern.get(self.intent_index)
    }

    /// Moves the cursor one step, wrapping at the end of the pattern.
    pub fn advance_intent(&mut self) {
        let len = self.definition.pattern.len();
        if len > 0 {
            self.intent_index = (self.intent_index + 1) % len;
        }
    }

    pub fn gain_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp());
    }
}
