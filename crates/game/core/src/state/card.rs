//! Card definitions and instances.

use strum::{Display, EnumIter, EnumString};

use super::effect::Effect;
use super::ids::CardInstanceId;

/// Card category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CardCategory {
    Attack,
    Defense,
    Forge,
    Hybrid,
    Power,
    Curse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Alternate text, effects, and (optionally) cost of an upgraded card.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardUpgrade {
    pub description: String,
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<u32>,
}

/// Immutable card template keyed by `id`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardDefinition {
    pub id: String,
    pub name: String,
    pub category: CardCategory,
    pub rarity: Rarity,
    /// Energy cost.
    pub cost: u32,
    pub description: String,
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub upgrade: Option<CardUpgrade>,
    /// Played copies go to the exhaust pile instead of discard.
    #[cfg_attr(feature = "serde", serde(default))]
    pub exhaust: bool,
    /// Copies stay in hand at end of turn.
    #[cfg_attr(feature = "serde", serde(default))]
    pub retain: bool,
}

impl CardDefinition {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: CardCategory,
        rarity: Rarity,
        cost: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            rarity,
            cost,
            description: String::new(),
            effects: Vec::new(),
            tags: Vec::new(),
            upgrade: None,
            exhaust: false,
            retain: false,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_upgrade(mut self, upgrade: CardUpgrade) -> Self {
        self.upgrade = Some(upgrade);
        self
    }

    #[must_use]
    pub fn exhausting(mut self) -> Self {
        self.exhaust = true;
        self
    }

    #[must_use]
    pub fn retained(mut self) -> Self {
        self.retain = true;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A concrete copy of a card owned by the player.
///
/// Instances carry their own copy of the definition so an upgrade can rewrite
/// it in place without touching the shared template.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub card: CardDefinition,
    pub upgraded: bool,
}

impl CardInstance {
    pub fn new(id: CardInstanceId, card: CardDefinition) -> Self {
        Self {
            id,
            card,
            upgraded: false,
        }
    }

    pub fn cost(&self) -> u32 {
        self.card.cost
    }

    pub fn name(&self) -> &str {
        &self.card.name
    }

    /// True when the card has an upgraded variant it has not taken yet.
    pub fn can_upgrade(&self) -> bool {
        !self.upgraded && self.card.upgrade.is_some()
    }

    /// Rewrites this instance with its upgraded variant.
    ///
    /// Returns false (and changes nothing) when already upgraded or when the
    /// definition has no upgraded variant.
    pub fn upgrade(&mut self) -> bool {
        if self.upgraded {
            return false;
        }
        let Some(upgrade) = self.card.upgrade.clone() else {
            return false;
        };

        self.card.name.push('+');
        self.card.description = upgrade.description;
        self.card.effects = upgrade.effects;
        if let Some(cost) = upgrade.cost {
            self.card.cost = cost;
        }
        self.upgraded = true;
        true
    }
}
