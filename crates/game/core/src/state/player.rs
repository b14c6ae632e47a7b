//! The player's forge: survival, resources, and the owned deck.

use super::card::{CardInstance, Rarity};
use super::ids::CardInstanceId;
use super::status::StatusEffects;

/// A permanent relic held for the whole run.
///
/// Triggers are content hooks; the core only tracks ownership.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Artifact {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
}

/// A boon granted by an NPC; tracked like artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blessing {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// State that survives from combat to combat within a run.
///
/// HP and currencies persist; block and energy are reset at combat and turn
/// boundaries by the resolver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerState {
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub block: u32,
    pub statuses: StatusEffects,
    /// Every card instance the player owns.
    pub deck: Vec<CardInstance>,
    pub artifacts: Vec<Artifact>,
    pub blessings: Vec<Blessing>,
    pub divine_favor: u32,
    pub adamant_shards: u32,
}

impl PlayerState {
    pub fn new(max_hp: u32, max_energy: u32, deck: Vec<CardInstance>) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy,
            max_energy,
            block: 0,
            statuses: StatusEffects::new(),
            deck,
            artifacts: Vec::new(),
            blessings: Vec::new(),
            divine_favor: 0,
            adamant_shards: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Restores HP up to max. Returns the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// Loses HP ignoring block. Returns the amount actually lost.
    pub fn lose_hp(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    pub fn gain_block(&mut self, amount: u32) {
        self.block = self.block.saturating_add(amount);
    }

    pub fn refill_energy(&mut self) {
        self.energy = self.max_energy;
    }

    pub fn add_divine_favor(&mut self, amount: u32) {
        self.divine_favor = self.divine_favor.saturating_add(amount);
    }

    /// Spends Divine Favor. Fails without mutation on insufficient balance.
    pub fn spend_divine_favor(&mut self, amount: u32) -> bool {
        match self.divine_favor.checked_sub(amount) {
            Some(rest) => {
                self.divine_favor = rest;
                true
            }
            None => false,
        }
    }

    pub fn add_adamant_shards(&mut self, amount: u32) {
        self.adamant_shards = self.adamant_shards.saturating_add(amount);
    }

    /// Spends Adamant Shards. Fails without mutation on insufficient balance.
    pub fn spend_adamant_shards(&mut self, amount: u32) -> bool {
        match self.adamant_shards.checked_sub(amount) {
            Some(rest) => {
                self.adamant_shards = rest;
                true
            }
            None => false,
        }
    }

    pub fn deck_card(&self, id: CardInstanceId) -> Option<&CardInstance> {
        self.deck.iter().find(|card| card.id == id)
    }

    pub fn deck_card_mut(&mut self, id: CardInstanceId) -> Option<&mut CardInstance> {
        self.deck.iter_mut().find(|card| card.id == id)
    }

    /// Removes a card from the deck, returning it if it was present.
    pub fn remove_card(&mut self, id: CardInstanceId) -> Option<CardInstance> {
        let position = self.deck.iter().position(|card| card.id == id)?;
        Some(self.deck.remove(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spending_more_than_balance_changes_nothing() {
        let mut player = PlayerState::new(80, 3, Vec::new());
        player.add_divine_favor(50);

        assert!(!player.spend_divine_favor(75));
        assert_eq!(player.divine_favor, 50);

        assert!(player.spend_divine_favor(50));
        assert_eq!(player.divine_favor, 0);
    }

    #[test]
    fn shards_follow_the_same_rule() {
        let mut player = PlayerState::new(80, 3, Vec::new());
        assert!(!player.spend_adamant_shards(1));
        player.add_adamant_shards(2);
        assert!(player.spend_adamant_shards(1));
        assert_eq!(player.adamant_shards, 1);
    }

    #[test]
    fn heal_and_hp_loss_stay_in_bounds() {
        let mut player = PlayerState::new(80, 3, Vec::new());

        assert_eq!(player.lose_hp(100), 80);
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());

        assert_eq!(player.heal(200), 80);
        assert_eq!(player.hp, 80);
    }
}
