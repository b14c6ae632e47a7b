//! Built-in enemy definitions for act 1.

use game_core::{EnemyDefinition, Intent, LootTable, StatusKind};

fn enemy(id: &str, name: &str, max_hp: u32, pattern: Vec<Intent>, loot: LootTable) -> EnemyDefinition {
    EnemyDefinition {
        id: id.into(),
        name: name.into(),
        max_hp,
        pattern,
        loot,
        act: 1,
        elite: false,
        boss: false,
    }
}

pub fn imp_swarm() -> EnemyDefinition {
    enemy(
        "imp-swarm",
        "Imp Swarm",
        12,
        vec![
            Intent::multi_attack(4, 2),
            Intent::multi_attack(4, 2),
            Intent::defend(6),
        ],
        LootTable::favor(10),
    )
}

pub fn lost_soul() -> EnemyDefinition {
    enemy(
        "lost-soul",
        "Lost Soul",
        18,
        vec![
            Intent::attack(6),
            Intent::Debuff {
                status: StatusKind::Weak,
                duration: 2,
            },
            Intent::attack(8),
        ],
        LootTable::favor(12),
    )
}

pub fn hellfire_acolyte() -> EnemyDefinition {
    enemy(
        "hellfire-acolyte",
        "Hellfire Acolyte",
        22,
        vec![
            Intent::Buff {
                status: StatusKind::Strength,
                duration: 1,
            },
            Intent::attack(10),
            Intent::attack(10),
        ],
        LootTable::favor(15),
    )
}

pub fn corrupted_hoplite() -> EnemyDefinition {
    enemy(
        "corrupted-hoplite",
        "Corrupted Hoplite",
        28,
        vec![
            Intent::defend(8),
            Intent::attack(12),
            Intent::AttackDebuff {
                damage: 8,
                status: StatusKind::Vulnerable,
                duration: 2,
            },
        ],
        LootTable::favor(18),
    )
}

pub fn inferno_knight() -> EnemyDefinition {
    EnemyDefinition {
        elite: true,
        ..enemy(
            "inferno-knight",
            "Inferno Knight",
            55,
            vec![
                Intent::heavy_attack(18),
                Intent::defend(12),
                Intent::AttackBuff {
                    damage: 12,
                    status: StatusKind::Strength,
                    duration: 1,
                },
                Intent::heavy_attack(22),
            ],
            LootTable {
                divine_favor: 30,
                adamant_shard_chance: 0.25,
                card_reward: true,
                artifact_chance: 0.0,
            },
        )
    }
}

pub fn cerberus_pup() -> EnemyDefinition {
    EnemyDefinition {
        boss: true,
        ..enemy(
            "cerberus-pup",
            "Cerberus Pup",
            120,
            vec![
                Intent::multi_attack(8, 3),
                Intent::heavy_attack(25),
                Intent::Buff {
                    status: StatusKind::Strength,
                    duration: 2,
                },
                Intent::multi_attack(12, 2),
            ],
            LootTable {
                divine_favor: 100,
                adamant_shard_chance: 1.0,
                card_reward: true,
                artifact_chance: 0.5,
            },
        )
    }
}

/// Every built-in enemy, basics first.
pub fn all() -> Vec<EnemyDefinition> {
    vec![
        imp_swarm(),
        lost_soul(),
        hellfire_acolyte(),
        corrupted_hoplite(),
        inferno_knight(),
        cerberus_pup(),
    ]
}
