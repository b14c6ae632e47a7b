//! Deterministic rules for a turn-based roguelike run.
//!
//! `game-core` defines the canonical data model (cards, enemies, map, player,
//! run) and the pure rules that transform it: the seeded RNG, the act map
//! generator, and the combat resolver. Nothing here performs I/O; the
//! `runtime` crate owns mutation ordering, persistence, and notification.
pub mod combat;
pub mod config;
pub mod error;
pub mod mapgen;
pub mod rng;
pub mod state;

pub use combat::{
    CombatEngine, CombatError, CombatStatus, DamageResult, PlayOutcome, TurnOutcome,
    apply_mitigated_damage, begin_combat, resolve_intent,
};
pub use config::{GameConfig, MapConfig};
pub use error::{ErrorSeverity, GameError};
pub use mapgen::generate_map;
pub use rng::{RandomSource, SeededRng};
pub use state::{
    Artifact, Blessing, CardCategory, CardDefinition, CardInstance, CardInstanceId, CardUpgrade,
    CombatPhase, CombatState, Effect, EffectKind, EnemyDefinition, EnemyInstance,
    EnemyInstanceId, GameMap, InstanceIdAllocator, Intent, LootTable, MapError, MapNode, NodeId,
    NodeType, PendingSelection, PlayerState, ProgressionState, Rarity, Reward, RunState,
    StatusEffect, StatusEffects, StatusKind, TargetSelector,
};
