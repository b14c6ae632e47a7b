//! Out-of-combat events.
//!
//! An event is a short prompt with a list of options. Choosing an option
//! applies its outcomes to the player and returns to the map.

use game_core::NodeType;

/// One consequence of picking an event option.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum EventOutcome {
    Heal(u32),
    LoseHp(u32),
    GainDivineFavor(u32),
    GainAdamantShards(u32),
    /// Permanently upgrade one random upgradable deck card (run RNG).
    UpgradeRandomCard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventOption {
    pub label: String,
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub outcomes: Vec<EventOutcome>,
}

impl EventOption {
    pub fn new(label: &str, description: &str, outcomes: Vec<EventOutcome>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            outcomes,
        }
    }

    /// An option with no consequences.
    pub fn leave() -> Self {
        Self::new("Leave", "Continue on your path.", Vec::new())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Node types that may roll this event.
    pub node_types: Vec<NodeType>,
    pub options: Vec<EventOption>,
}

pub fn ancient_shrine() -> EventDefinition {
    EventDefinition {
        id: "ancient-shrine".into(),
        title: "Mysterious Encounter".into(),
        description: "An ancient shrine lies half-buried in ash. Strange whispers promise \
                      power to those who dare approach."
            .into(),
        node_types: vec![NodeType::Event],
        options: vec![
            EventOption::new(
                "Approach the shrine",
                "Gain 25 Divine Favor.",
                vec![EventOutcome::GainDivineFavor(25)],
            ),
            EventOption::new("Pray for healing", "Heal 10 HP.", vec![EventOutcome::Heal(10)]),
            EventOption::leave(),
        ],
    }
}

pub fn abandoned_anvil() -> EventDefinition {
    EventDefinition {
        id: "abandoned-anvil".into(),
        title: "Abandoned Anvil".into(),
        description: "A forge still glows beneath the rubble, its anvil warm to the touch.".into(),
        node_types: vec![NodeType::ForgeUpgrade],
        options: vec![
            EventOption::new(
                "Work the metal",
                "Upgrade a random card.",
                vec![EventOutcome::UpgradeRandomCard],
            ),
            EventOption::new(
                "Scavenge the slag",
                "Gain 1 Adamant Shard.",
                vec![EventOutcome::GainAdamantShards(1)],
            ),
            EventOption::leave(),
        ],
    }
}

pub fn blood_altar() -> EventDefinition {
    EventDefinition {
        id: "blood-altar".into(),
        title: "Blood Altar".into(),
        description: "The altar hungers. The gods reward those who feed it.".into(),
        node_types: vec![NodeType::Shrine, NodeType::Event],
        options: vec![
            EventOption::new(
                "Offer blood",
                "Lose 8 HP. Gain 40 Divine Favor.",
                vec![EventOutcome::LoseHp(8), EventOutcome::GainDivineFavor(40)],
            ),
            EventOption::leave(),
        ],
    }
}

/// Every built-in event.
pub fn all() -> Vec<EventDefinition> {
    vec![ancient_shrine(), abandoned_anvil(), blood_altar()]
}
