//! Enemy intent resolution.

use crate::state::{EnemyInstance, Intent, PlayerState};

use super::damage::apply_mitigated_damage;

/// Resolves one enemy's current intent against the player and advances its
/// cursor exactly once.
///
/// Returns the HP the player lost. Dead enemies and enemies without a
/// pattern do nothing and keep their cursor.
///
/// Status-carrying intents deliver only their damage; the attached status is
/// left to content hooks. `Buff`, `Debuff`, `Summon`, `Heal`, and `Unknown`
/// only advance the cursor.
pub fn resolve_intent(enemy: &mut EnemyInstance, player: &mut PlayerState) -> u32 {
    if !enemy.is_alive() {
        return 0;
    }
    let Some(intent) = enemy.current_intent().cloned() else {
        return 0;
    };

    let mut hp_lost = 0;
    match intent {
        Intent::Attack { damage, times } | Intent::HeavyAttack { damage, times } => {
            for _ in 0..times.max(1) {
                hp_lost += apply_mitigated_damage(&mut player.hp, &mut player.block, damage).hp_lost;
            }
        }
        Intent::AttackDebuff { damage, .. } | Intent::AttackBuff { damage, .. } => {
            hp_lost += apply_mitigated_damage(&mut player.hp, &mut player.block, damage).hp_lost;
        }
        Intent::Defend { block } => enemy.gain_block(block),
        Intent::Buff { .. }
        | Intent::Debuff { .. }
        | Intent::Summon { .. }
        | Intent::Heal { .. }
        | Intent::Unknown => {}
    }

    enemy.advance_intent();
    hp_lost
}
