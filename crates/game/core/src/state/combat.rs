//! Live combat encounter state.

use super::card::CardInstance;
use super::enemy::EnemyInstance;
use super::ids::CardInstanceId;

/// Turn state machine tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CombatPhase {
    #[default]
    PlayerTurn,
    /// Enemies are resolving their intents.
    EnemyTurn,
    /// Every enemy is dead.
    Victory,
    /// The player's HP reached zero.
    Defeat,
}

impl CombatPhase {
    pub const fn is_finished(&self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// A follow-up choice the resolver is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PendingSelection {
    /// Pick a hand card to upgrade for the rest of this combat.
    UpgradeCard,
}

/// State of one combat encounter. Absent from the run outside combat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatState {
    /// Starts at 1 and only ever increases.
    pub turn: u32,
    pub phase: CombatPhase,
    pub enemies: Vec<EnemyInstance>,
    pub hand: Vec<CardInstance>,
    /// Cards are drawn from the end.
    pub draw_pile: Vec<CardInstance>,
    pub discard_pile: Vec<CardInstance>,
    pub exhaust_pile: Vec<CardInstance>,
    pub cards_played_this_turn: u32,
    pub energy_spent_this_turn: u32,
    pub damage_dealt_this_turn: u32,
    /// Number of cards across all piles when the combat began.
    pub deck_size: usize,
    pub pending_selection: Option<PendingSelection>,
}

impl CombatState {
    /// Cards currently held across hand and every pile.
    pub fn card_count(&self) -> usize {
        self.hand.len() + self.draw_pile.len() + self.discard_pile.len() + self.exhaust_pile.len()
    }

    pub fn hand_card(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.hand.iter().find(|card| card.id == id)
    }

    pub fn hand_position(&self, id: CardInstanceId) -> Option<usize> {
        self.hand.iter().position(|card| card.id == id)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &EnemyInstance> {
        self.enemies.iter().filter(|enemy| enemy.is_alive())
    }

    pub fn all_enemies_dead(&self) -> bool {
        self.enemies.iter().all(|enemy| !enemy.is_alive())
    }

    pub fn awaiting_selection(&self) -> bool {
        self.pending_selection.is_some()
    }

    pub(crate) fn reset_turn_counters(&mut self) {
        self.cards_played_this_turn = 0;
        self.energy_spent_this_turn = 0;
        self.damage_dealt_this_turn = 0;
    }
}
