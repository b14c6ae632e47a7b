//! Turn state machine and card-effect pipeline.

use crate::config::GameConfig;
use crate::rng::RandomSource;
use crate::state::{
    CardInstance, CardInstanceId, CombatPhase, CombatState, EffectKind, EnemyInstance,
    PendingSelection, PlayerState, StatusKind, TargetSelector,
};

use super::damage::apply_mitigated_damage;
use super::error::CombatError;
use super::intent::resolve_intent;

/// Where the encounter stands after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatStatus {
    Ongoing,
    Victory,
    Defeat,
}

impl CombatStatus {
    pub const fn is_over(&self) -> bool {
        !matches!(self, Self::Ongoing)
    }
}

/// Result of a successfully played card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayOutcome {
    pub card: CardInstanceId,
    pub exhausted: bool,
    /// HP removed from enemies by this card.
    pub damage_dealt: u32,
    pub cards_drawn: usize,
    /// The card asked for a follow-up hand selection.
    pub selection_requested: bool,
    pub status: CombatStatus,
}

/// Result of ending the player's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    /// Turn number after the increment.
    pub turn: u32,
    pub damage_taken: u32,
    pub cards_drawn: usize,
    pub status: CombatStatus,
}

/// Builds the state of a fresh encounter.
///
/// The player's deck is copied and shuffled into the draw pile with the run
/// RNG, energy is refilled, block is cleared, and the opening hand is drawn.
pub fn begin_combat<R: RandomSource>(
    player: &mut PlayerState,
    enemies: Vec<EnemyInstance>,
    rng: &mut R,
    config: &GameConfig,
) -> CombatState {
    let mut draw_pile = player.deck.clone();
    rng.shuffle(&mut draw_pile);

    player.refill_energy();
    player.block = 0;

    let mut combat = CombatState {
        turn: 1,
        phase: CombatPhase::PlayerTurn,
        enemies,
        hand: Vec::new(),
        deck_size: draw_pile.len(),
        draw_pile,
        discard_pile: Vec::new(),
        exhaust_pile: Vec::new(),
        cards_played_this_turn: 0,
        energy_spent_this_turn: 0,
        damage_dealt_this_turn: 0,
        pending_selection: None,
    };

    CombatEngine::new(&mut combat, player, rng, config).draw(config.hand_size);
    combat
}

/// Applies combat commands to a borrowed encounter.
///
/// Every command validates completely before mutating anything, so an `Err`
/// always means the state is exactly as it was.
pub struct CombatEngine<'a, R: RandomSource> {
    combat: &'a mut CombatState,
    player: &'a mut PlayerState,
    rng: &'a mut R,
    config: &'a GameConfig,
}

impl<'a, R: RandomSource> CombatEngine<'a, R> {
    pub fn new(
        combat: &'a mut CombatState,
        player: &'a mut PlayerState,
        rng: &'a mut R,
        config: &'a GameConfig,
    ) -> Self {
        Self {
            combat,
            player,
            rng,
            config,
        }
    }

    /// Victory and defeat as currently observable. Defeat wins ties.
    pub fn status(&self) -> CombatStatus {
        if !self.player.is_alive() {
            CombatStatus::Defeat
        } else if self.combat.all_enemies_dead() {
            CombatStatus::Victory
        } else {
            CombatStatus::Ongoing
        }
    }

    // ========================================================================
    // Play card
    // ========================================================================

    /// Plays a hand card, resolving its effects in declaration order.
    ///
    /// `target` picks the enemy for single-target effects. When omitted, the
    /// first living enemy is used.
    pub fn play_card(
        &mut self,
        card_id: CardInstanceId,
        target: Option<usize>,
    ) -> Result<PlayOutcome, CombatError> {
        self.ensure_player_turn()?;

        let position = self
            .combat
            .hand_position(card_id)
            .ok_or(CombatError::CardNotInHand(card_id))?;
        let cost = self.combat.hand[position].cost();
        if cost > self.player.energy {
            return Err(CombatError::InsufficientEnergy {
                cost,
                available: self.player.energy,
            });
        }
        let target = self.resolve_target(&self.combat.hand[position], target)?;

        // Validation done; from here on the command always applies.
        let card = self.combat.hand.remove(position);
        self.player.energy -= cost;

        let mut pending_draws: usize = 0;
        let mut damage_dealt = 0;
        let mut selection_requested = false;

        for effect in &card.card.effects {
            for _ in 0..effect.repetitions() {
                match &effect.kind {
                    EffectKind::Damage { amount, target: selector } => {
                        damage_dealt += self.deal_damage(*selector, target, *amount);
                    }
                    EffectKind::Block { amount } => self.player.gain_block(*amount),
                    EffectKind::Heal { amount } => {
                        self.player.heal(*amount);
                    }
                    EffectKind::Draw { count } => pending_draws += *count as usize,
                    EffectKind::GainEnergy { amount } => {
                        self.player.energy = self.player.energy.saturating_add(*amount);
                    }
                    EffectKind::LoseHp { amount } => {
                        self.player.lose_hp(*amount);
                    }
                    EffectKind::ApplyStatus {
                        status,
                        stacks,
                        duration,
                        target: selector,
                    } => self.apply_status(*selector, target, *status, *stacks, *duration),
                    EffectKind::GainDivineFavor { amount } => self.player.add_divine_favor(*amount),
                    EffectKind::GainAdamantShards { amount } => {
                        self.player.add_adamant_shards(*amount)
                    }
                    EffectKind::UpgradeCard => {
                        self.combat.pending_selection = Some(PendingSelection::UpgradeCard);
                        selection_requested = true;
                    }
                }
            }
        }

        let exhausted = card.card.exhaust;
        if exhausted {
            self.combat.exhaust_pile.push(card);
        } else {
            self.combat.discard_pile.push(card);
        }

        self.combat.cards_played_this_turn += 1;
        self.combat.energy_spent_this_turn += cost;
        self.combat.damage_dealt_this_turn += damage_dealt;

        let cards_drawn = self.draw(pending_draws);
        let status = self.settle();

        Ok(PlayOutcome {
            card: card_id,
            exhausted,
            damage_dealt,
            cards_drawn,
            selection_requested,
            status,
        })
    }

    /// Index of the enemy single-target effects will hit, if the card has any.
    fn resolve_target(
        &self,
        card: &CardInstance,
        requested: Option<usize>,
    ) -> Result<Option<usize>, CombatError> {
        let needs_target = card.card.effects.iter().any(|effect| {
            matches!(
                effect.kind,
                EffectKind::Damage {
                    target: TargetSelector::Enemy,
                    ..
                } | EffectKind::ApplyStatus {
                    target: TargetSelector::Enemy,
                    ..
                }
            )
        });
        if !needs_target {
            return Ok(None);
        }

        match requested {
            Some(index) => match self.combat.enemies.get(index) {
                Some(enemy) if enemy.is_alive() => Ok(Some(index)),
                _ => Err(CombatError::InvalidTarget { index }),
            },
            None => Ok(self.combat.enemies.iter().position(EnemyInstance::is_alive)),
        }
    }

    /// Indices of the living enemies a selector currently covers.
    fn select_enemies(&mut self, selector: TargetSelector, target: Option<usize>) -> Vec<usize> {
        let living: Vec<usize> = self
            .combat
            .enemies
            .iter()
            .enumerate()
            .filter(|(_, enemy)| enemy.is_alive())
            .map(|(idx, _)| idx)
            .collect();

        match selector {
            TargetSelector::Enemy => target
                .filter(|idx| living.contains(idx))
                .into_iter()
                .collect(),
            TargetSelector::AllEnemies => living,
            TargetSelector::RandomEnemy => self.rng.choose(&living).copied().into_iter().collect(),
            TargetSelector::SelfTarget => Vec::new(),
        }
    }

    /// Returns HP removed from enemies (self damage is not counted).
    fn deal_damage(&mut self, selector: TargetSelector, target: Option<usize>, amount: u32) -> u32 {
        if selector == TargetSelector::SelfTarget {
            apply_mitigated_damage(&mut self.player.hp, &mut self.player.block, amount);
            return 0;
        }

        let mut dealt = 0;
        for idx in self.select_enemies(selector, target) {
            let enemy = &mut self.combat.enemies[idx];
            dealt += apply_mitigated_damage(&mut enemy.hp, &mut enemy.block, amount).hp_lost;
        }
        dealt
    }

    fn apply_status(
        &mut self,
        selector: TargetSelector,
        target: Option<usize>,
        status: StatusKind,
        stacks: u32,
        duration: Option<u32>,
    ) {
        if selector == TargetSelector::SelfTarget {
            self.player.statuses.apply(status, stacks, duration);
            return;
        }

        for idx in self.select_enemies(selector, target) {
            self.combat.enemies[idx]
                .statuses
                .apply(status, stacks, duration);
        }
    }

    // ========================================================================
    // End turn
    // ========================================================================

    /// Ends the player's turn and runs the enemy turn.
    ///
    /// Non-retained hand cards are discarded, every living enemy resolves its
    /// intent, then all block resets, energy refills, and the turn counter
    /// increments. A new hand is drawn unless the player died.
    pub fn end_turn(&mut self) -> Result<TurnOutcome, CombatError> {
        self.ensure_player_turn()?;

        let (retained, discarded): (Vec<_>, Vec<_>) = std::mem::take(&mut self.combat.hand)
            .into_iter()
            .partition(|card| card.card.retain);
        self.combat.hand = retained;
        self.combat.discard_pile.extend(discarded);

        self.combat.phase = CombatPhase::EnemyTurn;
        let mut damage_taken = 0;
        for enemy in &mut self.combat.enemies {
            damage_taken += resolve_intent(enemy, self.player);
        }

        for enemy in &mut self.combat.enemies {
            enemy.block = 0;
        }
        self.player.block = 0;
        self.player.refill_energy();
        self.combat.turn += 1;
        self.combat.reset_turn_counters();
        self.combat.phase = CombatPhase::PlayerTurn;

        let mut cards_drawn = 0;
        if self.player.is_alive() {
            cards_drawn = self.draw(self.config.hand_size);
        }
        let status = self.settle();

        Ok(TurnOutcome {
            turn: self.combat.turn,
            damage_taken,
            cards_drawn,
            status,
        })
    }

    // ========================================================================
    // Draw
    // ========================================================================

    /// Draws up to `count` cards, stopping at the max hand size.
    ///
    /// An empty draw pile is refilled by shuffling the discard pile into it.
    /// Stops early when both are empty. Returns the number of cards drawn.
    pub fn draw(&mut self, count: usize) -> usize {
        let mut drawn = 0;
        while drawn < count && self.combat.hand.len() < self.config.max_hand_size {
            if self.combat.draw_pile.is_empty() {
                if self.combat.discard_pile.is_empty() {
                    break;
                }
                self.combat.draw_pile = std::mem::take(&mut self.combat.discard_pile);
                self.rng.shuffle(&mut self.combat.draw_pile);
            }

            let Some(card) = self.combat.draw_pile.pop() else {
                break;
            };
            self.combat.hand.push(card);
            drawn += 1;
        }
        drawn
    }

    // ========================================================================
    // Pending selection
    // ========================================================================

    /// Upgrades a hand card for the rest of this combat, settling the pending
    /// upgrade selection.
    ///
    /// Only hand cards that are not yet upgraded and have an upgraded variant
    /// qualify; anything else leaves the selection pending.
    pub fn upgrade_card_in_hand(&mut self, card_id: CardInstanceId) -> Result<(), CombatError> {
        if self.combat.pending_selection != Some(PendingSelection::UpgradeCard) {
            return Err(CombatError::NoSelectionPending);
        }

        let card = self
            .combat
            .hand
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or(CombatError::CardNotInHand(card_id))?;
        if !card.upgrade() {
            return Err(CombatError::CardNotUpgradable(card_id));
        }

        self.combat.pending_selection = None;
        Ok(())
    }

    /// Dismisses the pending selection without choosing anything.
    pub fn cancel_selection(&mut self) -> Result<(), CombatError> {
        self.combat
            .pending_selection
            .take()
            .map(|_| ())
            .ok_or(CombatError::NoSelectionPending)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn ensure_player_turn(&self) -> Result<(), CombatError> {
        if self.combat.phase != CombatPhase::PlayerTurn {
            return Err(CombatError::WrongPhase(self.combat.phase));
        }
        if self.combat.awaiting_selection() {
            return Err(CombatError::SelectionPending);
        }
        Ok(())
    }

    /// Moves the phase to its absorbing state once the fight is decided.
    fn settle(&mut self) -> CombatStatus {
        let status = self.status();
        match status {
            CombatStatus::Victory => self.combat.phase = CombatPhase::Victory,
            CombatStatus::Defeat => self.combat.phase = CombatPhase::Defeat,
            CombatStatus::Ongoing => {}
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;
    use crate::state::{
        CardCategory, CardDefinition, CardUpgrade, Effect, EnemyDefinition, EnemyInstanceId,
        InstanceIdAllocator, Intent, LootTable, Rarity,
    };

    fn card(id: &str, cost: u32, effects: Vec<Effect>) -> CardDefinition {
        let mut def = CardDefinition::new(id, id, CardCategory::Attack, Rarity::Common, cost);
        def.effects = effects;
        def
    }

    fn strike() -> CardDefinition {
        card("strike", 1, vec![Effect::damage(6)])
    }

    fn enemy_def(max_hp: u32, pattern: Vec<Intent>) -> EnemyDefinition {
        EnemyDefinition {
            id: "target".into(),
            name: "Target".into(),
            max_hp,
            pattern,
            loot: LootTable::favor(10),
            act: 1,
            elite: false,
            boss: false,
        }
    }

    struct Fixture {
        combat: CombatState,
        player: PlayerState,
        rng: SeededRng,
        config: GameConfig,
        ids: InstanceIdAllocator,
    }

    impl Fixture {
        /// Combat with an empty hand and empty piles.
        fn new(enemies: Vec<EnemyDefinition>) -> Self {
            let mut ids = InstanceIdAllocator::new();
            let enemies = enemies
                .into_iter()
                .map(|def| EnemyInstance::spawn(ids.next_enemy(), def))
                .collect();
            let combat = CombatState {
                turn: 1,
                phase: CombatPhase::PlayerTurn,
                enemies,
                hand: Vec::new(),
                draw_pile: Vec::new(),
                discard_pile: Vec::new(),
                exhaust_pile: Vec::new(),
                cards_played_this_turn: 0,
                energy_spent_this_turn: 0,
                damage_dealt_this_turn: 0,
                deck_size: 0,
                pending_selection: None,
            };
            Self {
                combat,
                player: PlayerState::new(80, 3, Vec::new()),
                rng: SeededRng::from_seed("combat-tests"),
                config: GameConfig::default(),
                ids,
            }
        }

        fn add_to_hand(&mut self, def: CardDefinition) -> CardInstanceId {
            let card = CardInstance::new(self.ids.next_card(), def);
            let id = card.id;
            self.combat.hand.push(card);
            self.combat.deck_size += 1;
            id
        }

        fn add_to(&mut self, pile: Pile, def: CardDefinition) {
            let card = CardInstance::new(self.ids.next_card(), def);
            match pile {
                Pile::Draw => self.combat.draw_pile.push(card),
                Pile::Discard => self.combat.discard_pile.push(card),
            }
            self.combat.deck_size += 1;
        }

        fn engine(&mut self) -> CombatEngine<'_, SeededRng> {
            CombatEngine::new(
                &mut self.combat,
                &mut self.player,
                &mut self.rng,
                &self.config,
            )
        }
    }

    enum Pile {
        Draw,
        Discard,
    }

    #[test]
    fn attack_card_damages_enemy_and_goes_to_discard() {
        let mut fx = Fixture::new(vec![enemy_def(12, vec![Intent::attack(1)])]);
        let id = fx.add_to_hand(strike());

        let outcome = fx.engine().play_card(id, Some(0)).expect("card is playable");

        assert_eq!(fx.combat.enemies[0].hp, 6);
        assert!(fx.combat.hand.is_empty());
        assert_eq!(fx.combat.discard_pile.len(), 1);
        assert_eq!(fx.combat.discard_pile[0].id, id);
        assert_eq!(fx.player.energy, 2);
        assert_eq!(outcome.damage_dealt, 6);
        assert_eq!(outcome.status, CombatStatus::Ongoing);
        assert_eq!(fx.combat.cards_played_this_turn, 1);
        assert_eq!(fx.combat.energy_spent_this_turn, 1);
    }

    #[test]
    fn too_expensive_card_changes_nothing() {
        let mut fx = Fixture::new(vec![enemy_def(12, vec![Intent::attack(1)])]);
        let id = fx.add_to_hand(card("smash", 2, vec![Effect::damage(12)]));
        fx.player.energy = 1;
        let combat_before = fx.combat.clone();
        let player_before = fx.player.clone();

        let err = fx.engine().play_card(id, Some(0)).unwrap_err();

        assert_eq!(err, CombatError::InsufficientEnergy { cost: 2, available: 1 });
        assert_eq!(fx.combat, combat_before);
        assert_eq!(fx.player, player_before);
    }

    #[test]
    fn unknown_card_and_dead_target_are_rejected() {
        let mut fx = Fixture::new(vec![
            enemy_def(12, vec![Intent::attack(1)]),
            enemy_def(12, vec![Intent::attack(1)]),
        ]);
        let id = fx.add_to_hand(strike());
        fx.combat.enemies[0].hp = 0;

        assert_eq!(
            fx.engine().play_card(CardInstanceId(999), None),
            Err(CombatError::CardNotInHand(CardInstanceId(999)))
        );
        assert_eq!(
            fx.engine().play_card(id, Some(0)),
            Err(CombatError::InvalidTarget { index: 0 })
        );
        assert_eq!(
            fx.engine().play_card(id, Some(5)),
            Err(CombatError::InvalidTarget { index: 5 })
        );

        // Without an explicit target the first living enemy is hit.
        fx.engine().play_card(id, None).expect("defaults to living enemy");
        assert_eq!(fx.combat.enemies[1].hp, 6);
    }

    #[test]
    fn block_on_enemy_absorbs_damage_first() {
        let mut fx = Fixture::new(vec![enemy_def(20, vec![Intent::attack(1)])]);
        fx.combat.enemies[0].block = 4;
        let id = fx.add_to_hand(strike());

        fx.engine().play_card(id, Some(0)).expect("card is playable");

        assert_eq!(fx.combat.enemies[0].block, 0);
        assert_eq!(fx.combat.enemies[0].hp, 18);
    }

    #[test]
    fn all_enemies_damage_skips_the_dead() {
        let mut fx = Fixture::new(vec![
            enemy_def(10, vec![Intent::attack(1)]),
            enemy_def(10, vec![Intent::attack(1)]),
            enemy_def(10, vec![Intent::attack(1)]),
        ]);
        fx.combat.enemies[1].hp = 0;
        fx.combat.enemies[2].block = 3;
        let id = fx.add_to_hand(card("sweep", 1, vec![Effect::damage_all(5)]));

        let outcome = fx.engine().play_card(id, None).expect("card is playable");

        assert_eq!(fx.combat.enemies[0].hp, 5);
        assert_eq!(fx.combat.enemies[1].hp, 0);
        assert_eq!(fx.combat.enemies[2].hp, 8);
        assert_eq!(outcome.damage_dealt, 7);
    }

    #[test]
    fn repeated_damage_stops_hitting_a_dead_target() {
        let mut fx = Fixture::new(vec![enemy_def(10, vec![Intent::attack(1)])]);
        let id = fx.add_to_hand(card("flurry", 1, vec![Effect::damage(4).repeated(4)]));

        let outcome = fx.engine().play_card(id, Some(0)).expect("card is playable");

        assert_eq!(fx.combat.enemies[0].hp, 0);
        assert_eq!(outcome.damage_dealt, 10);
        assert_eq!(outcome.status, CombatStatus::Victory);
        assert_eq!(fx.combat.phase, CombatPhase::Victory);
    }

    #[test]
    fn utility_effects_resolve_in_order() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        fx.player.hp = 70;
        fx.add_to(Pile::Draw, strike());
        fx.add_to(Pile::Draw, strike());
        let id = fx.add_to_hand(card(
            "kit",
            1,
            vec![
                Effect::block(5),
                Effect::heal(20),
                Effect::gain_energy(2),
                Effect::draw(1).repeated(2),
                Effect::gain_divine_favor(3),
                Effect::gain_adamant_shards(1),
            ],
        ));

        let outcome = fx.engine().play_card(id, None).expect("card is playable");

        assert_eq!(fx.player.block, 5);
        assert_eq!(fx.player.hp, 80);
        assert_eq!(fx.player.energy, 4);
        assert_eq!(outcome.cards_drawn, 2);
        assert_eq!(fx.combat.hand.len(), 2);
        assert_eq!(fx.player.divine_favor, 3);
        assert_eq!(fx.player.adamant_shards, 1);
    }

    #[test]
    fn self_damage_can_lose_the_fight() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        fx.player.hp = 5;
        fx.player.block = 2;
        let id = fx.add_to_hand(card(
            "backfire",
            0,
            vec![Effect::new(EffectKind::Damage {
                amount: 9,
                target: TargetSelector::SelfTarget,
            })],
        ));

        let outcome = fx.engine().play_card(id, None).expect("card is playable");

        assert_eq!(fx.player.hp, 0);
        assert_eq!(fx.player.block, 0);
        assert_eq!(outcome.status, CombatStatus::Defeat);
        assert_eq!(fx.combat.phase, CombatPhase::Defeat);
    }

    #[test]
    fn status_effects_stack_on_targets() {
        let mut fx = Fixture::new(vec![
            enemy_def(30, vec![Intent::attack(1)]),
            enemy_def(30, vec![Intent::attack(1)]),
        ]);
        let id = fx.add_to_hand(card(
            "hex",
            0,
            vec![
                Effect::apply_status(StatusKind::Vulnerable, 2, Some(2), TargetSelector::Enemy),
                Effect::apply_status(StatusKind::Weak, 1, None, TargetSelector::AllEnemies),
                Effect::apply_status(StatusKind::Strength, 1, None, TargetSelector::SelfTarget),
            ],
        ));

        fx.engine().play_card(id, Some(1)).expect("card is playable");

        assert_eq!(fx.combat.enemies[0].statuses.stacks(StatusKind::Vulnerable), 0);
        assert_eq!(fx.combat.enemies[1].statuses.stacks(StatusKind::Vulnerable), 2);
        assert_eq!(fx.combat.enemies[0].statuses.stacks(StatusKind::Weak), 1);
        assert_eq!(fx.combat.enemies[1].statuses.stacks(StatusKind::Weak), 1);
        assert_eq!(fx.player.statuses.stacks(StatusKind::Strength), 1);
    }

    #[test]
    fn exhaust_cards_leave_the_cycle() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        let id = fx.add_to_hand(card("burnout", 0, vec![Effect::block(1)]).exhausting());

        let outcome = fx.engine().play_card(id, None).expect("card is playable");

        assert!(outcome.exhausted);
        assert_eq!(fx.combat.exhaust_pile.len(), 1);
        assert!(fx.combat.discard_pile.is_empty());
    }

    #[test]
    fn draw_reshuffles_discard_when_pile_runs_out() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        for _ in 0..2 {
            fx.add_to(Pile::Draw, strike());
        }
        for _ in 0..4 {
            fx.add_to(Pile::Discard, strike());
        }

        let drawn = fx.engine().draw(5);

        assert_eq!(drawn, 5);
        assert_eq!(fx.combat.hand.len(), 5);
        assert_eq!(fx.combat.draw_pile.len(), 1);
        assert!(fx.combat.discard_pile.is_empty());
    }

    #[test]
    fn draw_stops_when_both_piles_are_empty() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        fx.add_to(Pile::Draw, strike());
        fx.add_to(Pile::Discard, strike());

        assert_eq!(fx.engine().draw(5), 2);
        assert_eq!(fx.combat.hand.len(), 2);
    }

    #[test]
    fn draw_respects_max_hand_size() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        for _ in 0..9 {
            fx.add_to_hand(strike());
        }
        for _ in 0..5 {
            fx.add_to(Pile::Draw, strike());
        }

        assert_eq!(fx.engine().draw(5), 1);
        assert_eq!(fx.combat.hand.len(), fx.config.max_hand_size);
    }

    #[test]
    fn end_turn_resolves_intents_and_resets() {
        let mut fx = Fixture::new(vec![
            enemy_def(30, vec![Intent::attack(7), Intent::defend(5)]),
            enemy_def(30, vec![Intent::defend(9), Intent::attack(2)]),
        ]);
        for _ in 0..6 {
            fx.add_to(Pile::Draw, strike());
        }
        fx.add_to_hand(strike());
        fx.add_to_hand(card("keep", 1, vec![Effect::block(1)]).retained());
        fx.player.block = 3;
        fx.player.energy = 0;

        let outcome = fx.engine().end_turn().expect("player turn");

        assert_eq!(outcome.damage_taken, 4);
        assert_eq!(fx.player.hp, 76);
        assert_eq!(fx.player.block, 0);
        assert_eq!(fx.player.energy, 3);
        assert_eq!(fx.combat.turn, 2);
        assert_eq!(outcome.turn, 2);
        assert!(fx.combat.enemies.iter().all(|enemy| enemy.block == 0));
        assert_eq!(fx.combat.enemies[0].intent_index, 1);
        assert_eq!(fx.combat.enemies[1].intent_index, 1);
        // One retained plus five drawn.
        assert_eq!(fx.combat.hand.len(), 6);
        assert!(fx.combat.hand.iter().any(|card| card.card.retain));
        assert_eq!(fx.combat.discard_pile.len(), 1);
        assert_eq!(fx.combat.card_count(), fx.combat.deck_size);
    }

    #[test]
    fn intent_cursor_wraps_after_four_turns() {
        let mut fx = Fixture::new(vec![enemy_def(
            30,
            vec![Intent::attack(1), Intent::defend(1), Intent::attack(1)],
        )]);

        for _ in 0..4 {
            fx.engine().end_turn().expect("player turn");
        }

        assert_eq!(fx.combat.enemies[0].intent_index, 1);
        assert_eq!(fx.combat.turn, 5);
    }

    #[test]
    fn lethal_enemy_turn_skips_the_draw() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::heavy_attack(99)])]);
        fx.add_to(Pile::Draw, strike());

        let outcome = fx.engine().end_turn().expect("player turn");

        assert_eq!(outcome.status, CombatStatus::Defeat);
        assert_eq!(fx.player.hp, 0);
        assert_eq!(outcome.cards_drawn, 0);
        assert!(fx.combat.hand.is_empty());
        assert_eq!(fx.combat.phase, CombatPhase::Defeat);
        assert!(fx.engine().end_turn().is_err());
    }

    #[test]
    fn upgrade_selection_blocks_play_until_settled() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        let temper = fx.add_to_hand(card("temper", 1, vec![Effect::upgrade_card()]));
        let plain = fx.add_to_hand(card("plain", 1, vec![Effect::block(1)]));
        let upgradable = fx.add_to_hand(strike().with_upgrade(CardUpgrade {
            description: "Deal 9 damage.".into(),
            effects: vec![Effect::damage(9)],
            cost: None,
        }));

        let outcome = fx.engine().play_card(temper, None).expect("card is playable");
        assert!(outcome.selection_requested);
        assert_eq!(fx.combat.pending_selection, Some(PendingSelection::UpgradeCard));

        assert_eq!(fx.engine().play_card(plain, None), Err(CombatError::SelectionPending));
        assert_eq!(fx.engine().end_turn(), Err(CombatError::SelectionPending));
        assert_eq!(
            fx.engine().upgrade_card_in_hand(plain),
            Err(CombatError::CardNotUpgradable(plain))
        );
        assert!(fx.combat.awaiting_selection());

        fx.engine().upgrade_card_in_hand(upgradable).expect("upgradable card");

        assert!(!fx.combat.awaiting_selection());
        let upgraded = fx.combat.hand_card(upgradable).expect("still in hand");
        assert!(upgraded.upgraded);
        assert_eq!(upgraded.name(), "strike+");
        assert_eq!(
            fx.engine().upgrade_card_in_hand(upgradable),
            Err(CombatError::NoSelectionPending)
        );
    }

    #[test]
    fn cancel_clears_pending_selection() {
        let mut fx = Fixture::new(vec![enemy_def(30, vec![Intent::attack(1)])]);
        fx.combat.pending_selection = Some(PendingSelection::UpgradeCard);

        fx.engine().cancel_selection().expect("selection pending");
        assert_eq!(fx.engine().cancel_selection(), Err(CombatError::NoSelectionPending));
    }

    #[test]
    fn begin_combat_shuffles_deck_and_draws_opening_hand() {
        let mut ids = InstanceIdAllocator::new();
        let deck: Vec<_> = (0..10)
            .map(|_| CardInstance::new(ids.next_card(), strike()))
            .collect();
        let mut player = PlayerState::new(80, 3, deck);
        player.energy = 0;
        player.block = 7;
        let enemies = vec![EnemyInstance::spawn(
            EnemyInstanceId(100),
            enemy_def(12, vec![Intent::attack(1)]),
        )];
        let mut rng = SeededRng::from_seed("opening");
        let config = GameConfig::default();

        let combat = begin_combat(&mut player, enemies, &mut rng, &config);

        assert_eq!(combat.turn, 1);
        assert_eq!(combat.phase, CombatPhase::PlayerTurn);
        assert_eq!(combat.hand.len(), config.hand_size);
        assert_eq!(combat.draw_pile.len(), 5);
        assert_eq!(combat.deck_size, 10);
        assert_eq!(player.energy, 3);
        assert_eq!(player.block, 0);
        assert_eq!(player.deck.len(), 10);
    }
}
