//! Combat commands.

use game_core::{
    CardInstanceId, CombatEngine, CombatError, CombatStatus, EnemyInstance, NodeType, SeededRng,
};

use super::{Apply, GameStore};
use crate::api::{CommandOutcome, CommandRejection};
use crate::events::StoreEvent;
use crate::snapshot::GamePhase;

impl GameStore {
    /// Plays a hand card. `target` indexes the enemy list; `None` aims at
    /// the first living enemy.
    ///
    /// A dead or out-of-range `target` refuses the whole play: no energy is
    /// spent and the card stays in hand.
    pub fn play_card(&mut self, card_id: CardInstanceId, target: Option<usize>) -> CommandOutcome {
        let result = self.apply_play_card(card_id, target);
        self.finish("play_card", result)
    }

    fn apply_play_card(&mut self, card_id: CardInstanceId, target: Option<usize>) -> Apply {
        let outcome = self.with_engine(|engine| engine.play_card(card_id, target))?;
        tracing::debug!(
            card = %card_id,
            damage = outcome.damage_dealt,
            drawn = outcome.cards_drawn,
            "Card played"
        );

        if outcome.status.is_over() {
            self.finish_combat(outcome.status);
        }
        Ok(())
    }

    /// Ends the player's turn and resolves every enemy intent.
    pub fn end_turn(&mut self) -> CommandOutcome {
        let result = self.apply_end_turn();
        self.finish("end_turn", result)
    }

    fn apply_end_turn(&mut self) -> Apply {
        let outcome = self.with_engine(|engine| engine.end_turn())?;
        tracing::debug!(
            turn = outcome.turn,
            damage_taken = outcome.damage_taken,
            "Enemy turn resolved"
        );

        if outcome.status.is_over() {
            self.finish_combat(outcome.status);
        }
        Ok(())
    }

    /// Draws extra cards outside the turn flow, reshuffling the discard pile
    /// when the draw pile runs out.
    pub fn draw_cards(&mut self, count: usize) -> CommandOutcome {
        let result = self
            .with_engine(|engine| Ok(engine.draw(count)))
            .map(|drawn| tracing::debug!(requested = count, drawn, "Cards drawn"));
        self.finish("draw_cards", result)
    }

    /// Chooses the hand card for a pending upgrade. The upgrade lasts until
    /// the end of this combat.
    pub fn upgrade_card_in_hand(&mut self, card_id: CardInstanceId) -> CommandOutcome {
        let result = self.with_engine(|engine| engine.upgrade_card_in_hand(card_id));
        self.finish("upgrade_card_in_hand", result)
    }

    /// Dismisses a pending upgrade selection without upgrading anything.
    pub fn cancel_upgrade(&mut self) -> CommandOutcome {
        let result = self.with_engine(|engine| engine.cancel_selection());
        self.finish("cancel_upgrade", result)
    }

    /// Runs one engine command against the live encounter.
    fn with_engine<T>(
        &mut self,
        command: impl FnOnce(&mut CombatEngine<'_, SeededRng>) -> Result<T, CombatError>,
    ) -> Result<T, CommandRejection> {
        self.ensure_phase(&[GamePhase::Combat])?;
        let run = self.run.as_mut().ok_or(CommandRejection::NoActiveRun)?;
        let combat = run.combat.as_mut().ok_or(CommandRejection::NoCombat)?;

        let mut engine = CombatEngine::new(combat, &mut run.player, &mut run.rng, &self.config);
        Ok(command(&mut engine)?)
    }

    // ========================================================================
    // Encounter boundaries
    // ========================================================================

    /// Opens an encounter with already rolled enemies.
    pub(super) fn enter_combat(&mut self, node_type: NodeType, enemies: Vec<EnemyInstance>) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let names: Vec<String> = enemies.iter().map(|e| e.definition.name.clone()).collect();
        tracing::info!(node = %node_type, enemies = ?names, "Combat started");

        let combat = game_core::begin_combat(&mut run.player, enemies, &mut run.rng, &self.config);
        run.combat = Some(combat);
        self.phase = GamePhase::Combat;
        self.pending_events
            .push(StoreEvent::CombatStarted { enemies: names });
    }

    /// Destroys the encounter and moves to the reward or game-over screen.
    pub(super) fn finish_combat(&mut self, status: CombatStatus) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        let Some(combat) = run.combat.take() else {
            return;
        };

        run.player.block = 0;
        run.player.statuses.clear();

        let victory = status == CombatStatus::Victory;
        self.pending_events.push(StoreEvent::CombatEnded {
            victory,
            turns: combat.turn,
        });

        if victory {
            let reward = self.catalog.roll_reward(&combat.enemies, &mut run.rng);
            tracing::info!(
                turns = combat.turn,
                divine_favor = reward.divine_favor,
                adamant_shards = reward.adamant_shards,
                "Combat won"
            );
            run.pending_reward = Some(reward);
            self.phase = GamePhase::Reward;
        } else {
            tracing::info!(turns = combat.turn, "Combat lost");
            self.end_run_in_defeat();
        }
    }

    /// Moves to the game-over screen if the player just died.
    ///
    /// Inside combat this ends the encounter as a defeat.
    pub(super) fn check_player_death(&mut self) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        if run.player.is_alive() {
            return;
        }

        if run.combat.is_some() {
            self.finish_combat(CombatStatus::Defeat);
        } else {
            self.end_run_in_defeat();
        }
    }
}
