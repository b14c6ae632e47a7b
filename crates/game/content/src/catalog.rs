//! Content catalog: static definitions keyed by identity string.
//!
//! The catalog is the only place the runtime looks up definitions. It never
//! changes after construction; everything that varies during a run is an
//! instance derived from it.

use std::collections::BTreeMap;

use game_core::{
    CardDefinition, CardInstance, EnemyDefinition, EnemyInstance, InstanceIdAllocator, NodeType,
    RandomSource, Reward,
};

use crate::events::EventDefinition;
use crate::{cards, enemies, events};

/// Number of cards offered by a card reward.
pub const CARD_REWARD_CHOICES: usize = 3;

/// Errors raised when content is missing or inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("unknown card id '{0}'")]
    UnknownCard(String),

    #[error("unknown enemy id '{0}'")]
    UnknownEnemy(String),

    #[error("no {kind:?} enemies available for act {act}")]
    EmptyPool { act: u32, kind: EncounterKind },

    #[error("node type {0} does not start an encounter")]
    NotAnEncounter(NodeType),

    #[error("enemy '{0}' has an empty intent pattern")]
    EmptyPattern(String),

    #[error("event '{0}' has no options")]
    EmptyEvent(String),
}

/// Which enemy pool an encounter draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncounterKind {
    /// One or two basic enemies.
    Basic,
    Elite,
    Boss,
}

impl EncounterKind {
    pub fn for_node(node_type: NodeType) -> Option<Self> {
        match node_type {
            NodeType::Combat => Some(Self::Basic),
            NodeType::EliteCombat => Some(Self::Elite),
            NodeType::Boss => Some(Self::Boss),
            _ => None,
        }
    }

    fn matches(&self, enemy: &EnemyDefinition) -> bool {
        match self {
            Self::Basic => !enemy.elite && !enemy.boss,
            Self::Elite => enemy.elite,
            Self::Boss => enemy.boss,
        }
    }
}

/// All static game content.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentCatalog {
    pub cards: BTreeMap<String, CardDefinition>,
    pub enemies: BTreeMap<String, EnemyDefinition>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub events: BTreeMap<String, EventDefinition>,
    /// Card ids of a fresh deck, one entry per copy.
    pub starting_deck: Vec<String>,
}

impl ContentCatalog {
    /// Builds a catalog from lists of definitions.
    pub fn new(
        cards: impl IntoIterator<Item = CardDefinition>,
        enemies: impl IntoIterator<Item = EnemyDefinition>,
        events: impl IntoIterator<Item = EventDefinition>,
        starting_deck: Vec<String>,
    ) -> Self {
        Self {
            cards: cards.into_iter().map(|c| (c.id.clone(), c)).collect(),
            enemies: enemies.into_iter().map(|e| (e.id.clone(), e)).collect(),
            events: events.into_iter().map(|e| (e.id.clone(), e)).collect(),
            starting_deck,
        }
    }

    /// The content shipped with the game.
    pub fn builtin() -> Self {
        Self::new(cards::all(), enemies::all(), events::all(), cards::starting_deck())
    }

    pub fn card(&self, id: &str) -> Result<&CardDefinition, ContentError> {
        self.cards
            .get(id)
            .ok_or_else(|| ContentError::UnknownCard(id.to_owned()))
    }

    pub fn enemy(&self, id: &str) -> Result<&EnemyDefinition, ContentError> {
        self.enemies
            .get(id)
            .ok_or_else(|| ContentError::UnknownEnemy(id.to_owned()))
    }

    pub fn event(&self, id: &str) -> Option<&EventDefinition> {
        self.events.get(id)
    }

    /// Checks cross references and shapes the engine relies on.
    pub fn validate(&self) -> Result<(), ContentError> {
        for id in &self.starting_deck {
            self.card(id)?;
        }
        for enemy in self.enemies.values() {
            if enemy.pattern.is_empty() {
                return Err(ContentError::EmptyPattern(enemy.id.clone()));
            }
        }
        for event in self.events.values() {
            if event.options.is_empty() {
                return Err(ContentError::EmptyEvent(event.id.clone()));
            }
        }
        Ok(())
    }

    /// Instantiates a fresh starting deck.
    pub fn starting_deck(
        &self,
        ids: &mut InstanceIdAllocator,
    ) -> Result<Vec<CardInstance>, ContentError> {
        let cards = self
            .starting_deck
            .iter()
            .map(|id| self.card(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards
            .into_iter()
            .map(|card| CardInstance::new(ids.next_card(), card.clone()))
            .collect())
    }

    /// Instantiates a single card by id. An unknown id allocates nothing.
    pub fn instantiate_card(
        &self,
        id: &str,
        ids: &mut InstanceIdAllocator,
    ) -> Result<CardInstance, ContentError> {
        let card = self.card(id)?.clone();
        Ok(CardInstance::new(ids.next_card(), card))
    }

    /// Enemies of `kind` for `act`, falling back to act 1 when the act has
    /// none.
    fn pool(&self, act: u32, kind: EncounterKind) -> Vec<&EnemyDefinition> {
        let for_act = |act: u32| -> Vec<&EnemyDefinition> {
            self.enemies
                .values()
                .filter(|enemy| enemy.act == act && kind.matches(enemy))
                .collect()
        };

        let pool = for_act(act);
        if pool.is_empty() && act != 1 {
            return for_act(1);
        }
        pool
    }

    /// Rolls the enemies for a combat node with the run RNG.
    ///
    /// Basic encounters draw one or two enemies (repeats allowed), elite
    /// encounters one elite, and boss nodes the first boss of the act.
    pub fn roll_encounter<R: RandomSource>(
        &self,
        act: u32,
        node_type: NodeType,
        ids: &mut InstanceIdAllocator,
        rng: &mut R,
    ) -> Result<Vec<EnemyInstance>, ContentError> {
        let kind = EncounterKind::for_node(node_type).ok_or(ContentError::NotAnEncounter(node_type))?;
        let pool = self.pool(act, kind);
        if pool.is_empty() {
            return Err(ContentError::EmptyPool { act, kind });
        }

        let picks: Vec<&EnemyDefinition> = match kind {
            EncounterKind::Basic => {
                let count = rng.range(1, 2);
                (0..count)
                    .filter_map(|_| rng.choose(&pool).copied())
                    .collect()
            }
            EncounterKind::Elite => rng.choose(&pool).copied().into_iter().collect(),
            EncounterKind::Boss => vec![pool[0]],
        };

        Ok(picks
            .into_iter()
            .map(|def| EnemyInstance::spawn(ids.next_enemy(), def.clone()))
            .collect())
    }

    /// Picks an event for an event-like node with the run RNG.
    pub fn roll_event<R: RandomSource>(
        &self,
        node_type: NodeType,
        rng: &mut R,
    ) -> Option<&EventDefinition> {
        let pool: Vec<&EventDefinition> = self
            .events
            .values()
            .filter(|event| event.node_types.contains(&node_type))
            .collect();
        rng.choose(&pool).copied()
    }

    /// Computes the spoils of a won combat from the enemies' loot tables.
    ///
    /// Divine Favor is summed; each enemy rolls its shard chance once; a card
    /// reward offers up to [`CARD_REWARD_CHOICES`] distinct cards.
    pub fn roll_reward<R: RandomSource>(&self, defeated: &[EnemyInstance], rng: &mut R) -> Reward {
        let mut reward = Reward::default();
        let mut card_reward = false;

        for enemy in defeated {
            let loot = &enemy.definition.loot;
            reward.divine_favor = reward.divine_favor.saturating_add(loot.divine_favor);
            if loot.adamant_shard_chance > 0.0 && rng.chance(loot.adamant_shard_chance) {
                reward.adamant_shards += 1;
            }
            card_reward |= loot.card_reward;
            reward.boss |= enemy.definition.boss;
        }

        if card_reward {
            let mut pool: Vec<&String> = self.cards.keys().collect();
            rng.shuffle(&mut pool);
            reward.card_choices = pool
                .into_iter()
                .take(CARD_REWARD_CHOICES)
                .cloned()
                .collect();
        }

        reward
    }
}
