use std::collections::BTreeSet;

use crate::rng::SeededRng;

use super::combat::CombatState;
use super::ids::InstanceIdAllocator;
use super::map::GameMap;
use super::player::PlayerState;

/// Spoils of a won combat, waiting to be claimed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub divine_favor: u32,
    pub adamant_shards: u32,
    /// Card ids offered to add to the deck; at most one may be taken.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_choices: Vec<String>,
    /// Claiming this reward ends the run in victory.
    pub boss: bool,
}

/// Everything that belongs to the run in progress.
///
/// The RNG travels with the run so that a restored save keeps drawing from
/// the same stream.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunState {
    pub seed: String,
    pub rng: SeededRng,
    pub map: GameMap,
    pub player: PlayerState,
    pub combat: Option<CombatState>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub visited_npcs: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub current_event: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_reward: Option<Reward>,
    pub ids: InstanceIdAllocator,
}

impl RunState {
    pub fn new(
        seed: impl Into<String>,
        rng: SeededRng,
        map: GameMap,
        player: PlayerState,
        ids: InstanceIdAllocator,
    ) -> Self {
        Self {
            seed: seed.into(),
            rng,
            map,
            player,
            combat: None,
            visited_npcs: BTreeSet::new(),
            current_event: None,
            pending_reward: None,
            ids,
        }
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }
}
