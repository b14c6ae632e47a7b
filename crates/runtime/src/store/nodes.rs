//! Map navigation and the screens behind each node.

use game_content::{EncounterKind, EventOutcome};
use game_core::{CardInstanceId, NodeId, NodeType, RandomSource};

use super::{Apply, GameStore};
use crate::api::{CommandOutcome, CommandRejection, Currency};
use crate::events::{RunEnd, StoreEvent};
use crate::snapshot::GamePhase;

impl GameStore {
    // ========================================================================
    // Map
    // ========================================================================

    /// Travels to a map node and enters whatever it holds.
    ///
    /// The node must be available and unvisited. Sibling branches close
    /// behind the player; the node's connections open.
    pub fn select_node(&mut self, node_id: NodeId) -> CommandOutcome {
        let result = self.apply_select_node(node_id);
        self.finish("select_node", result)
    }

    fn apply_select_node(&mut self, node_id: NodeId) -> Apply {
        self.ensure_phase(&[GamePhase::Map])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;
        let node_type = run.map.validate_selection(node_id)?.node_type;

        // Roll on copies so a content failure leaves the run untouched.
        let mut rng = run.rng.clone();
        let mut ids = run.ids.clone();
        let enemies = match EncounterKind::for_node(node_type) {
            Some(_) => Some(self.catalog.roll_encounter(run.map.act, node_type, &mut ids, &mut rng)?),
            None => None,
        };
        let event = match node_type {
            NodeType::Event | NodeType::ForgeUpgrade | NodeType::Shrine => self
                .catalog
                .roll_event(node_type, &mut rng)
                .map(|event| event.id.clone()),
            _ => None,
        };

        run.map.select(node_id)?;
        run.rng = rng;
        run.ids = ids;
        tracing::debug!(node = %node_id, kind = %node_type, "Node selected");

        if let Some(enemies) = enemies {
            self.enter_combat(node_type, enemies);
            return Ok(());
        }

        self.phase = match node_type {
            NodeType::Rest => GamePhase::Rest,
            NodeType::Shop => GamePhase::Shop,
            _ => {
                run.current_event = event;
                GamePhase::Event
            }
        };
        Ok(())
    }

    /// Returns to the map from a reward, shop, rest, or event screen.
    ///
    /// Unclaimed rewards and unresolved events are forfeited.
    pub fn leave_node(&mut self) -> CommandOutcome {
        let result = self.apply_leave_node();
        self.finish("leave_node", result)
    }

    fn apply_leave_node(&mut self) -> Apply {
        if !self.phase.is_node_screen() {
            return Err(CommandRejection::WrongPhase(self.phase));
        }
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;

        // Leaving the boss reward still ends the run.
        if run.pending_reward.take().is_some_and(|reward| reward.boss) {
            self.win_run();
            return Ok(());
        }
        run.current_event = None;
        self.phase = GamePhase::Map;
        Ok(())
    }

    // ========================================================================
    // Reward
    // ========================================================================

    /// Takes the pending combat reward, optionally adding one offered card
    /// to the deck. Claiming the boss reward wins the run.
    pub fn claim_reward(&mut self, card: Option<&str>) -> CommandOutcome {
        let result = self.apply_claim_reward(card);
        self.finish("claim_reward", result)
    }

    fn apply_claim_reward(&mut self, card: Option<&str>) -> Apply {
        self.ensure_phase(&[GamePhase::Reward])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;
        let reward = run.pending_reward.as_ref().ok_or(CommandRejection::NoReward)?;

        if let Some(card) = card
            && !reward.card_choices.iter().any(|choice| choice == card)
        {
            return Err(CommandRejection::CardNotOffered(card.to_owned()));
        }
        let mut ids = run.ids.clone();
        let new_card = card
            .map(|card| self.catalog.instantiate_card(card, &mut ids))
            .transpose()?;

        let Some(reward) = run.pending_reward.take() else {
            return Err(CommandRejection::NoReward);
        };
        run.ids = ids;
        run.player.add_divine_favor(reward.divine_favor);
        run.player.add_adamant_shards(reward.adamant_shards);
        if let Some(card) = new_card {
            tracing::debug!(card = %card.card.id, "Card added from reward");
            run.player.deck.push(card);
        }

        if reward.boss {
            self.win_run();
        } else {
            self.phase = GamePhase::Map;
        }
        Ok(())
    }

    fn win_run(&mut self) {
        self.phase = GamePhase::Victory;
        self.progression.record_victory();
        tracing::info!(runs_won = self.progression.runs_won, "Run won");
        self.pending_events.push(StoreEvent::RunEnded {
            outcome: RunEnd::Victory,
        });
    }

    // ========================================================================
    // Rest
    // ========================================================================

    /// Heals a fraction of max HP and returns to the map.
    pub fn rest(&mut self) -> CommandOutcome {
        let result = self.apply_rest();
        self.finish("rest", result)
    }

    fn apply_rest(&mut self) -> Apply {
        self.ensure_phase(&[GamePhase::Rest])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;

        let amount = self.config.rest_heal_amount(run.player.max_hp);
        let healed = run.player.heal(amount);
        tracing::debug!(healed, hp = run.player.hp, "Rested");

        self.phase = GamePhase::Map;
        Ok(())
    }

    // ========================================================================
    // Shop
    // ========================================================================

    /// Pays Divine Favor to remove a card from the deck.
    pub fn purchase_card_removal(&mut self, card_id: CardInstanceId) -> CommandOutcome {
        let result = self.apply_purchase_card_removal(card_id);
        self.finish("purchase_card_removal", result)
    }

    fn apply_purchase_card_removal(&mut self, card_id: CardInstanceId) -> Apply {
        self.ensure_phase(&[GamePhase::Shop])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;
        let cost = self.config.shop_removal_cost;

        if run.player.deck_card(card_id).is_none() {
            return Err(CommandRejection::CardNotInDeck(card_id));
        }
        if !run.player.spend_divine_favor(cost) {
            return Err(CommandRejection::InsufficientFunds {
                currency: Currency::DivineFavor,
                needed: cost,
                available: run.player.divine_favor,
            });
        }

        if let Some(card) = run.player.remove_card(card_id) {
            tracing::debug!(card = %card.name(), cost, "Card removed at shop");
        }
        Ok(())
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Resolves an event option and returns to the map.
    pub fn choose_event_option(&mut self, index: usize) -> CommandOutcome {
        let result = self.apply_choose_event_option(index);
        self.finish("choose_event_option", result)
    }

    fn apply_choose_event_option(&mut self, index: usize) -> Apply {
        self.ensure_phase(&[GamePhase::Event])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;
        let event = run
            .current_event
            .as_deref()
            .and_then(|id| self.catalog.event(id))
            .ok_or(CommandRejection::NoEvent)?;
        let option = event
            .options
            .get(index)
            .ok_or(CommandRejection::InvalidEventOption(index))?;
        tracing::debug!(event = %event.id, option = %option.label, "Event option chosen");

        for outcome in &option.outcomes {
            let player = &mut run.player;
            match outcome {
                EventOutcome::Heal(amount) => {
                    player.heal(*amount);
                }
                EventOutcome::LoseHp(amount) => {
                    player.lose_hp(*amount);
                }
                EventOutcome::GainDivineFavor(amount) => player.add_divine_favor(*amount),
                EventOutcome::GainAdamantShards(amount) => player.add_adamant_shards(*amount),
                EventOutcome::UpgradeRandomCard => {
                    let candidates: Vec<CardInstanceId> = player
                        .deck
                        .iter()
                        .filter(|card| card.can_upgrade())
                        .map(|card| card.id)
                        .collect();
                    if let Some(id) = run.rng.choose(&candidates).copied()
                        && let Some(card) = run.player.deck_card_mut(id)
                    {
                        card.upgrade();
                        tracing::debug!(card = %card.name(), "Card upgraded by event");
                    }
                }
            }
        }

        run.current_event = None;
        self.phase = GamePhase::Map;
        self.check_player_death();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use game_core::Reward;

    fn store_at(phase: GamePhase) -> GameStore {
        let mut store = GameStore::builder()
            .config(RuntimeConfig::in_memory())
            .build()
            .expect("store builds");
        store.start_new_run(Some("screens".into()));
        store.phase = phase;
        store
    }

    fn player(store: &GameStore) -> &game_core::PlayerState {
        &store.run().expect("run active").player
    }

    #[test]
    fn resting_heals_thirty_percent() {
        let mut store = store_at(GamePhase::Rest);
        store.run.as_mut().expect("run").player.hp = 40;

        let outcome = store.rest();

        assert!(outcome.is_applied());
        assert_eq!(player(&store).hp, 64);
        assert_eq!(store.phase(), GamePhase::Map);
    }

    #[test]
    fn rest_is_refused_elsewhere() {
        let mut store = store_at(GamePhase::Map);
        assert_eq!(
            store.rest().rejection(),
            Some(&CommandRejection::WrongPhase(GamePhase::Map))
        );
    }

    #[test]
    fn card_removal_costs_favor() {
        let mut store = store_at(GamePhase::Shop);
        let card = player(&store).deck[0].id;

        assert_eq!(
            store.purchase_card_removal(card).rejection(),
            Some(&CommandRejection::InsufficientFunds {
                currency: Currency::DivineFavor,
                needed: 75,
                available: 0,
            })
        );

        store.add_divine_favor(100);
        let outcome = store.purchase_card_removal(card);

        assert!(outcome.is_applied());
        assert_eq!(player(&store).divine_favor, 25);
        assert_eq!(player(&store).deck.len(), 19);
        assert_eq!(store.phase(), GamePhase::Shop);
        assert_eq!(
            store.purchase_card_removal(card).rejection(),
            Some(&CommandRejection::CardNotInDeck(card))
        );
    }

    #[test]
    fn event_option_applies_and_returns_to_map() {
        let mut store = store_at(GamePhase::Event);
        store.run.as_mut().expect("run").current_event = Some("ancient-shrine".into());

        assert_eq!(
            store.choose_event_option(7).rejection(),
            Some(&CommandRejection::InvalidEventOption(7))
        );

        let outcome = store.choose_event_option(0);

        assert!(outcome.is_applied());
        assert_eq!(player(&store).divine_favor, 25);
        assert_eq!(store.phase(), GamePhase::Map);
        assert!(store.run().expect("run").current_event.is_none());
    }

    #[test]
    fn event_without_content_can_only_be_left() {
        let mut store = store_at(GamePhase::Event);

        assert_eq!(
            store.choose_event_option(0).rejection(),
            Some(&CommandRejection::NoEvent)
        );
        assert!(store.leave_node().is_applied());
        assert_eq!(store.phase(), GamePhase::Map);
    }

    #[test]
    fn fatal_event_ends_the_run() {
        let mut store = store_at(GamePhase::Event);
        let run = store.run.as_mut().expect("run");
        run.current_event = Some("blood-altar".into());
        run.player.hp = 5;

        store.choose_event_option(0);

        assert_eq!(store.phase(), GamePhase::GameOver);
        assert_eq!(store.progression().runs_completed, 1);
    }

    #[test]
    fn anvil_upgrades_a_deck_card() {
        let mut store = store_at(GamePhase::Event);
        store.run.as_mut().expect("run").current_event = Some("abandoned-anvil".into());

        store.choose_event_option(0);

        let upgraded = player(&store).deck.iter().filter(|c| c.upgraded).count();
        assert_eq!(upgraded, 1);
    }

    #[test]
    fn boss_reward_wins_the_run() {
        let mut store = store_at(GamePhase::Reward);
        store.run.as_mut().expect("run").pending_reward = Some(Reward {
            divine_favor: 100,
            adamant_shards: 1,
            card_choices: Vec::new(),
            boss: true,
        });

        let outcome = store.claim_reward(None);

        assert!(outcome.is_applied());
        assert_eq!(outcome.snapshot.phase, GamePhase::Victory);
        assert_eq!(outcome.snapshot.progression.runs_won, 1);
        assert_eq!(outcome.snapshot.progression.runs_completed, 1);
        assert_eq!(player(&store).divine_favor, 100);
        assert_eq!(player(&store).adamant_shards, 1);

        assert!(store.acknowledge_game_over().is_applied());
        assert_eq!(store.phase(), GamePhase::Menu);
    }

    #[test]
    fn leaving_a_reward_forfeits_it() {
        let mut store = store_at(GamePhase::Reward);
        store.run.as_mut().expect("run").pending_reward = Some(Reward {
            divine_favor: 40,
            ..Reward::default()
        });

        assert!(store.leave_node().is_applied());

        assert_eq!(store.phase(), GamePhase::Map);
        assert_eq!(player(&store).divine_favor, 0);
        assert!(store.run().expect("run").pending_reward.is_none());
        assert_eq!(
            store.claim_reward(None).rejection(),
            Some(&CommandRejection::WrongPhase(GamePhase::Map))
        );
    }
}
