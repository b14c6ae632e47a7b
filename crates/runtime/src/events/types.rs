//! Notifications published by the store.

use serde::{Deserialize, Serialize};

use crate::snapshot::GamePhase;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEnd {
    Abandoned,
    Defeat,
    Victory,
}

/// Emitted after a committed change. Consumers re-read the snapshot; events
/// only say that, and roughly why, it moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// Any committed change, published once per command.
    StateChanged { revision: u64, phase: GamePhase },

    RunStarted { seed: String },

    /// The run left play. Published when the outcome is decided, not when
    /// the game-over screen is acknowledged.
    RunEnded { outcome: RunEnd },

    CombatStarted { enemies: Vec<String> },

    CombatEnded { victory: bool, turns: u32 },

    /// The save blob could not be written. The in-memory state is intact.
    PersistenceFailed { error: String },
}
