//! Built-in card definitions.
//!
//! The starting deck is twenty cards drawn from nine forge-and-hammer
//! templates. Every template has an upgraded variant.

use game_core::{CardCategory, CardDefinition, CardUpgrade, Effect, Rarity};

fn upgrade(description: &str, effects: Vec<Effect>) -> CardUpgrade {
    CardUpgrade {
        description: description.into(),
        effects,
        cost: None,
    }
}

pub fn hammer_strike() -> CardDefinition {
    CardDefinition::new("hammer-strike", "Hammer Strike", CardCategory::Attack, Rarity::Common, 1)
        .with_description("Deal 6 damage.")
        .with_effect(Effect::damage(6))
        .with_tags(["Strike", "Weapon"])
        .with_upgrade(upgrade("Deal 8 damage.", vec![Effect::damage(8)]))
}

pub fn forge_smash() -> CardDefinition {
    CardDefinition::new("forge-smash", "Forge Smash", CardCategory::Attack, Rarity::Common, 2)
        .with_description("Deal 12 damage.")
        .with_effect(Effect::damage(12))
        .with_tags(["Strike", "Weapon"])
        .with_upgrade(upgrade("Deal 16 damage.", vec![Effect::damage(16)]))
}

pub fn spartan_strike() -> CardDefinition {
    CardDefinition::new("spartan-strike", "Spartan Strike", CardCategory::Attack, Rarity::Common, 1)
        .with_description("Deal 7 damage.")
        .with_effect(Effect::damage(7))
        .with_tags(["Strike", "Spartan"])
        .with_upgrade(upgrade("Deal 10 damage.", vec![Effect::damage(10)]))
}

pub fn shield_brace() -> CardDefinition {
    CardDefinition::new("shield-brace", "Shield Brace", CardCategory::Defense, Rarity::Common, 1)
        .with_description("Gain 5 Block.")
        .with_effect(Effect::block(5))
        .with_tags(["Block"])
        .with_upgrade(upgrade("Gain 8 Block.", vec![Effect::block(8)]))
}

pub fn aspis_guard() -> CardDefinition {
    CardDefinition::new("aspis-guard", "Aspis Guard", CardCategory::Defense, Rarity::Common, 1)
        .with_description("Gain 6 Block.")
        .with_effect(Effect::block(6))
        .with_tags(["Block", "Spartan"])
        .with_upgrade(upgrade("Gain 9 Block.", vec![Effect::block(9)]))
}

pub fn temper() -> CardDefinition {
    let description = "Upgrade a card in hand for this combat.";
    CardDefinition::new("temper", "Temper", CardCategory::Forge, Rarity::Common, 1)
        .with_description(description)
        .with_effect(Effect::upgrade_card())
        .with_tags(["Forge"])
        .with_upgrade(CardUpgrade {
            cost: Some(0),
            ..upgrade(description, vec![Effect::upgrade_card()])
        })
}

pub fn bellows_blast() -> CardDefinition {
    CardDefinition::new("bellows-blast", "Bellows Blast", CardCategory::Forge, Rarity::Common, 0)
        .with_description("Gain 1 Energy.")
        .with_effect(Effect::gain_energy(1))
        .with_tags(["Forge", "Fire"])
        .with_upgrade(upgrade("Gain 2 Energy.", vec![Effect::gain_energy(2)]))
}

pub fn stoke_flames() -> CardDefinition {
    CardDefinition::new("stoke-flames", "Stoke Flames", CardCategory::Forge, Rarity::Common, 1)
        .with_description("Draw 2 cards.")
        .with_effect(Effect::draw(2))
        .with_tags(["Forge", "Fire"])
        .with_upgrade(upgrade("Draw 3 cards.", vec![Effect::draw(3)]))
}

pub fn combat_forge() -> CardDefinition {
    CardDefinition::new("combat-forge", "Combat Forge", CardCategory::Hybrid, Rarity::Common, 2)
        .with_description("Deal 8 damage. Draw 1 card.")
        .with_effect(Effect::damage(8))
        .with_effect(Effect::draw(1))
        .with_tags(["Strike", "Forge"])
        .with_upgrade(upgrade(
            "Deal 11 damage. Draw 1 card.",
            vec![Effect::damage(11), Effect::draw(1)],
        ))
}

/// Every built-in card template.
pub fn all() -> Vec<CardDefinition> {
    vec![
        hammer_strike(),
        forge_smash(),
        spartan_strike(),
        shield_brace(),
        aspis_guard(),
        temper(),
        bellows_blast(),
        stoke_flames(),
        combat_forge(),
    ]
}

/// Card ids of the starting deck, one entry per copy, in deck order.
pub fn starting_deck() -> Vec<String> {
    [
        ("hammer-strike", 4),
        ("forge-smash", 2),
        ("spartan-strike", 1),
        ("shield-brace", 4),
        ("aspis-guard", 2),
        ("temper", 3),
        ("bellows-blast", 2),
        ("stoke-flames", 1),
        ("combat-forge", 1),
    ]
    .into_iter()
    .flat_map(|(id, copies)| std::iter::repeat_n(id.to_owned(), copies))
    .collect()
}
