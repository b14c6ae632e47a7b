//! Property-based tests for the combat resolver and map generator.

use proptest::prelude::*;

use game_core::{
    CardCategory, CardDefinition, CardInstance, CardUpgrade, CombatEngine, CombatState, Effect,
    EnemyDefinition, EnemyInstance, GameConfig, InstanceIdAllocator, Intent, LootTable,
    MapConfig, NodeType, PlayerState, Rarity, SeededRng, apply_mitigated_damage, begin_combat,
    generate_map,
};

#[derive(Clone, Debug)]
enum Command {
    Play { hand_slot: usize, target: Option<usize> },
    EndTurn,
    Upgrade { hand_slot: usize },
    Cancel,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        4 => (0usize..10, proptest::option::of(0usize..3))
            .prop_map(|(hand_slot, target)| Command::Play { hand_slot, target }),
        2 => Just(Command::EndTurn),
        1 => (0usize..10).prop_map(|hand_slot| Command::Upgrade { hand_slot }),
        1 => Just(Command::Cancel),
    ]
}

fn starter_deck(ids: &mut InstanceIdAllocator) -> Vec<CardInstance> {
    let strike = CardDefinition::new("strike", "Strike", CardCategory::Attack, Rarity::Common, 1)
        .with_effect(Effect::damage(6))
        .with_upgrade(CardUpgrade {
            description: "Deal 9 damage.".into(),
            effects: vec![Effect::damage(9)],
            cost: None,
        });
    let brace = CardDefinition::new("brace", "Brace", CardCategory::Defense, Rarity::Common, 1)
        .with_effect(Effect::block(5));
    let temper = CardDefinition::new("temper", "Temper", CardCategory::Forge, Rarity::Common, 1)
        .with_effect(Effect::upgrade_card());
    let stoke = CardDefinition::new("stoke", "Stoke", CardCategory::Forge, Rarity::Common, 0)
        .with_effect(Effect::draw(2))
        .exhausting();
    let sweep = CardDefinition::new("sweep", "Sweep", CardCategory::Attack, Rarity::Uncommon, 2)
        .with_effect(Effect::damage_all(4).repeated(2));
    let anchor = CardDefinition::new("anchor", "Anchor", CardCategory::Defense, Rarity::Rare, 1)
        .with_effect(Effect::block(3))
        .retained();

    [strike.clone(), strike, brace.clone(), brace, temper, stoke, sweep, anchor]
        .into_iter()
        .cycle()
        .take(14)
        .map(|def| CardInstance::new(ids.next_card(), def))
        .collect()
}

fn enemies(ids: &mut InstanceIdAllocator, count: usize) -> Vec<EnemyInstance> {
    (0..count)
        .map(|i| {
            EnemyInstance::spawn(
                ids.next_enemy(),
                EnemyDefinition {
                    id: format!("brute-{i}"),
                    name: "Brute".into(),
                    max_hp: 40,
                    pattern: vec![
                        Intent::multi_attack(3, 2),
                        Intent::defend(6),
                        Intent::heavy_attack(9),
                    ],
                    loot: LootTable::favor(10),
                    act: 1,
                    elite: false,
                    boss: false,
                },
            )
        })
        .collect()
}

fn apply(
    combat: &mut CombatState,
    player: &mut PlayerState,
    rng: &mut SeededRng,
    config: &GameConfig,
    command: &Command,
) {
    let hand_card = |combat: &CombatState, slot: usize| {
        combat.hand.get(slot % combat.hand.len().max(1)).map(|card| card.id)
    };
    let card = match command {
        Command::Play { hand_slot, .. } | Command::Upgrade { hand_slot } => {
            hand_card(combat, *hand_slot)
        }
        _ => None,
    };

    let mut engine = CombatEngine::new(combat, player, rng, config);
    // Rejections are part of the property: they must not break invariants.
    let _ = match (command, card) {
        (Command::Play { target, .. }, Some(card)) => engine.play_card(card, *target).map(drop),
        (Command::Upgrade { .. }, Some(card)) => engine.upgrade_card_in_hand(card),
        (Command::EndTurn, _) => engine.end_turn().map(drop),
        (Command::Cancel, _) => engine.cancel_selection(),
        _ => Ok(()),
    };
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Cards are moved between piles, never duplicated or lost.
    #[test]
    fn prop_cards_are_conserved(
        seed in any::<u64>(),
        enemy_count in 1usize..=3,
        commands in proptest::collection::vec(command(), 0..60),
    ) {
        let config = GameConfig::default();
        let mut rng = SeededRng::from_u64(seed);
        let mut ids = InstanceIdAllocator::new();
        let mut player = PlayerState::new(80, 3, starter_deck(&mut ids));
        let foes = enemies(&mut ids, enemy_count);
        let mut combat = begin_combat(&mut player, foes, &mut rng, &config);

        for command in &commands {
            apply(&mut combat, &mut player, &mut rng, &config, command);
            prop_assert_eq!(combat.card_count(), combat.deck_size);

            let mut seen: Vec<_> = combat
                .hand
                .iter()
                .chain(&combat.draw_pile)
                .chain(&combat.discard_pile)
                .chain(&combat.exhaust_pile)
                .map(|card| card.id)
                .collect();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), combat.deck_size);
        }
    }

    /// HP stays within bounds and the turn counter never goes backwards.
    #[test]
    fn prop_hp_bounded_and_turns_monotonic(
        seed in any::<u64>(),
        enemy_count in 1usize..=3,
        commands in proptest::collection::vec(command(), 0..60),
    ) {
        let config = GameConfig::default();
        let mut rng = SeededRng::from_u64(seed);
        let mut ids = InstanceIdAllocator::new();
        let mut player = PlayerState::new(80, 3, starter_deck(&mut ids));
        let foes = enemies(&mut ids, enemy_count);
        let mut combat = begin_combat(&mut player, foes, &mut rng, &config);

        let mut last_turn = combat.turn;
        for command in &commands {
            let ended_turn = matches!(command, Command::EndTurn);
            let turn_before = combat.turn;
            apply(&mut combat, &mut player, &mut rng, &config, command);

            prop_assert!(player.hp <= player.max_hp);
            for enemy in &combat.enemies {
                prop_assert!(enemy.hp <= enemy.max_hp());
            }
            prop_assert!(combat.turn >= last_turn);
            if ended_turn && combat.turn != turn_before {
                prop_assert_eq!(combat.turn, turn_before + 1);
            }
            last_turn = combat.turn;
        }
    }

    /// Damage `d` against block `b` costs `max(0, d - b)` HP and leaves
    /// `max(0, b - d)` block.
    #[test]
    fn prop_block_mitigation_law(hp in 0u32..500, block in 0u32..500, damage in 0u32..500) {
        let (mut new_hp, mut new_block) = (hp, block);
        let result = apply_mitigated_damage(&mut new_hp, &mut new_block, damage);

        prop_assert_eq!(new_block, block.saturating_sub(damage));
        prop_assert_eq!(new_hp, hp.saturating_sub(damage.saturating_sub(block)));
        prop_assert_eq!(result.blocked, block.min(damage));
        prop_assert!(result.hp_lost <= hp);
    }

    /// Identically seeded generators build identical maps.
    #[test]
    fn prop_map_generation_is_deterministic(seed in "[a-z0-9]{1,16}", act in 1u32..4) {
        let config = MapConfig::default();
        let first = generate_map(act, &config, &mut SeededRng::from_seed(&seed));
        let second = generate_map(act, &config, &mut SeededRng::from_seed(&seed));

        prop_assert_eq!(first, second);
    }

    /// Exactly one boss, always in the final row; only row 0 starts open.
    #[test]
    fn prop_map_shape(seed in any::<u64>()) {
        let config = MapConfig::default();
        let map = generate_map(1, &config, &mut SeededRng::from_u64(seed));

        let bosses: Vec<_> = map.nodes.iter().filter(|n| n.node_type == NodeType::Boss).collect();
        prop_assert_eq!(bosses.len(), 1);
        prop_assert_eq!(bosses[0].row(), config.rows);
        prop_assert_eq!(bosses[0].id, map.boss_node);

        for node in &map.nodes {
            prop_assert_eq!(node.available, node.row() == 0);
            for target in &node.connections {
                prop_assert_eq!(target.row, node.row() + 1);
            }
        }
    }
}
