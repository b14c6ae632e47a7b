//! Authoritative run state representation.
//!
//! This module owns the data structures that describe cards, enemies, the act
//! map, the player, and the run that aggregates them. Definitions are
//! immutable templates supplied by content; instances carry a unique identity
//! and the live values the rules operate on.
pub mod card;
pub mod combat;
pub mod effect;
pub mod enemy;
pub mod ids;
pub mod map;
pub mod player;
pub mod progression;
pub mod run;
pub mod status;

pub use card::{CardCategory, CardDefinition, CardInstance, CardUpgrade, Rarity};
pub use combat::{CombatPhase, CombatState, PendingSelection};
pub use effect::{Effect, EffectKind, TargetSelector};
pub use enemy::{EnemyDefinition, EnemyInstance, Intent, LootTable};
pub use ids::{CardInstanceId, EnemyInstanceId, InstanceIdAllocator};
pub use map::{GameMap, MapError, MapNode, NodeId, NodeType};
pub use player::{Artifact, Blessing, PlayerState};
pub use progression::ProgressionState;
pub use run::{Reward, RunState};
pub use status::{StatusEffect, StatusEffects, StatusKind};

/// Repetition count used when content omits one.
#[cfg(feature = "serde")]
pub(crate) const fn default_times() -> u32 {
    1
}
