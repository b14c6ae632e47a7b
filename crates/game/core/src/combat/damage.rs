//! Block mitigation.

// ============================================================================
// Damage Result
// ============================================================================

/// What a single mitigated hit did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageResult {
    /// Damage absorbed by block.
    pub blocked: u32,
    /// HP actually removed (never more than the HP the target had).
    pub hp_lost: u32,
}

impl DamageResult {
    pub fn killed(&self, remaining_hp: u32) -> bool {
        self.hp_lost > 0 && remaining_hp == 0
    }
}

// ============================================================================
// Mitigation
// ============================================================================

/// Applies `amount` damage to a target with the given HP and block.
///
/// # Formula
///
/// ```text
/// blocked   = min(block, amount)
/// block    -= blocked
/// hp        = max(0, hp - (amount - blocked))
/// ```
///
/// Block absorbs damage 1:1 before HP, never goes negative, and the excess
/// carries through to HP. HP is clamped at zero.
pub fn apply_mitigated_damage(hp: &mut u32, block: &mut u32, amount: u32) -> DamageResult {
    let blocked = (*block).min(amount);
    *block -= blocked;

    let hp_lost = (amount - blocked).min(*hp);
    *hp -= hp_lost;

    DamageResult { blocked, hp_lost }
}
