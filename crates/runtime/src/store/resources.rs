//! Direct player mutators.
//!
//! These back shops, events, and debugging tools. They apply to the live run
//! in any phase except the game-over and victory screens.

use game_core::{Artifact, Blessing, CardInstanceId, RunState, apply_mitigated_damage};

use super::{Apply, GameStore};
use crate::api::{CommandOutcome, CommandRejection, Currency};
use crate::snapshot::GamePhase;

impl GameStore {
    fn live_run(&mut self) -> Result<&mut RunState, CommandRejection> {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::Victory) {
            return Err(CommandRejection::WrongPhase(self.phase));
        }
        self.run.as_mut().ok_or(CommandRejection::NoActiveRun)
    }

    /// Runs a mutator that cannot fail once a live run exists.
    fn mutate(&mut self, command: &'static str, f: impl FnOnce(&mut RunState)) -> CommandOutcome {
        let result = self.live_run().map(f);
        self.finish(command, result)
    }

    // ========================================================================
    // Health and combat resources
    // ========================================================================

    /// Restores HP, clamped to max HP.
    pub fn heal_player(&mut self, amount: u32) -> CommandOutcome {
        self.mutate("heal_player", |run| {
            run.player.heal(amount);
        })
    }

    pub fn add_block(&mut self, amount: u32) -> CommandOutcome {
        self.mutate("add_block", |run| run.player.gain_block(amount))
    }

    /// Damages the player through block. Reaching 0 HP ends the run.
    pub fn deal_damage_to_player(&mut self, amount: u32) -> CommandOutcome {
        let result = self.apply_deal_damage_to_player(amount);
        self.finish("deal_damage_to_player", result)
    }

    fn apply_deal_damage_to_player(&mut self, amount: u32) -> Apply {
        let player = &mut self.live_run()?.player;
        let result = apply_mitigated_damage(&mut player.hp, &mut player.block, amount);
        tracing::debug!(
            blocked = result.blocked,
            hp_lost = result.hp_lost,
            "Player damaged"
        );

        self.check_player_death();
        Ok(())
    }

    /// Adjusts energy by `delta`, clamped to `[0, max_energy]`.
    pub fn modify_energy(&mut self, delta: i32) -> CommandOutcome {
        let max = self.config.max_energy;
        self.mutate("modify_energy", |run| {
            let energy = i64::from(run.player.energy) + i64::from(delta);
            run.player.energy = energy.clamp(0, i64::from(max)) as u32;
        })
    }

    // ========================================================================
    // Currencies
    // ========================================================================

    pub fn add_divine_favor(&mut self, amount: u32) -> CommandOutcome {
        self.mutate("add_divine_favor", |run| run.player.add_divine_favor(amount))
    }

    /// Spends Divine Favor. Returns `false` and changes nothing when the
    /// balance is short.
    pub fn spend_divine_favor(&mut self, amount: u32) -> bool {
        let result = self.apply_spend(Currency::DivineFavor, amount);
        self.finish("spend_divine_favor", result).is_applied()
    }

    pub fn add_adamant_shards(&mut self, amount: u32) -> CommandOutcome {
        self.mutate("add_adamant_shards", |run| {
            run.player.add_adamant_shards(amount)
        })
    }

    /// Spends Adamant Shards. Returns `false` and changes nothing when the
    /// balance is short.
    pub fn spend_adamant_shards(&mut self, amount: u32) -> bool {
        let result = self.apply_spend(Currency::AdamantShards, amount);
        self.finish("spend_adamant_shards", result).is_applied()
    }

    fn apply_spend(&mut self, currency: Currency, amount: u32) -> Apply {
        let player = &mut self.live_run()?.player;
        let (spent, available) = match currency {
            Currency::DivineFavor => (player.spend_divine_favor(amount), player.divine_favor),
            Currency::AdamantShards => (player.spend_adamant_shards(amount), player.adamant_shards),
        };

        if spent {
            Ok(())
        } else {
            Err(CommandRejection::InsufficientFunds {
                currency,
                needed: amount,
                available,
            })
        }
    }

    // ========================================================================
    // Deck
    // ========================================================================

    /// Adds a fresh instance of a catalog card to the deck.
    pub fn add_card_to_deck(&mut self, card_id: &str) -> CommandOutcome {
        let result = self.apply_add_card_to_deck(card_id);
        self.finish("add_card_to_deck", result)
    }

    fn apply_add_card_to_deck(&mut self, card_id: &str) -> Apply {
        self.live_run()?;
        let Some(run) = self.run.as_mut() else {
            return Err(CommandRejection::NoActiveRun);
        };

        let card = self.catalog.instantiate_card(card_id, &mut run.ids)?;
        run.player.deck.push(card);
        Ok(())
    }

    pub fn remove_card_from_deck(&mut self, card_id: CardInstanceId) -> CommandOutcome {
        let result = self.apply_remove_card_from_deck(card_id);
        self.finish("remove_card_from_deck", result)
    }

    fn apply_remove_card_from_deck(&mut self, card_id: CardInstanceId) -> Apply {
        self.live_run()?
            .player
            .remove_card(card_id)
            .map(|_| ())
            .ok_or(CommandRejection::CardNotInDeck(card_id))
    }

    /// Permanently upgrades a deck card.
    ///
    /// During combat the copy already in the piles keeps its current form
    /// until the next encounter.
    pub fn upgrade_card(&mut self, card_id: CardInstanceId) -> CommandOutcome {
        let result = self.apply_upgrade_card(card_id);
        self.finish("upgrade_card", result)
    }

    fn apply_upgrade_card(&mut self, card_id: CardInstanceId) -> Apply {
        let card = self
            .live_run()?
            .player
            .deck_card_mut(card_id)
            .ok_or(CommandRejection::CardNotInDeck(card_id))?;

        if card.upgrade() {
            Ok(())
        } else {
            Err(CommandRejection::CardNotUpgradable(card_id))
        }
    }

    // ========================================================================
    // Relics
    // ========================================================================

    pub fn add_artifact(&mut self, artifact: Artifact) -> CommandOutcome {
        self.mutate("add_artifact", |run| run.player.artifacts.push(artifact))
    }

    pub fn add_blessing(&mut self, blessing: Blessing) -> CommandOutcome {
        self.mutate("add_blessing", |run| run.player.blessings.push(blessing))
    }
}
