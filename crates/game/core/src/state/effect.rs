//! Card effects.
//!
//! An [`Effect`] is one tagged operation plus a repetition count. Cards carry
//! an ordered list of them; the combat resolver interprets the list in
//! declaration order and re-applies each body `times` times.

use super::status::StatusKind;

/// Who an effect lands on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TargetSelector {
    /// The enemy at the command's target index (index 0 when omitted).
    #[default]
    Enemy,
    /// Every living enemy, each mitigated independently.
    AllEnemies,
    /// The player.
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    SelfTarget,
    /// One living enemy chosen with the run RNG.
    RandomEnemy,
}

/// The operation an effect performs.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum EffectKind {
    // ========================================================================
    // Combat numbers
    // ========================================================================
    /// Damage mitigated by the target's block.
    Damage {
        amount: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        target: TargetSelector,
    },
    /// Add to the player's block.
    Block { amount: u32 },
    /// Restore player HP, clamped to max HP.
    Heal { amount: u32 },
    /// Queue draws; executed once after every effect of the card resolved.
    Draw { count: u32 },
    /// Add to current energy (no upper clamp).
    GainEnergy { amount: u32 },
    /// Lose HP directly, ignoring block.
    LoseHp { amount: u32 },

    // ========================================================================
    // Statuses
    // ========================================================================
    /// Stack a status on the selected target(s).
    ApplyStatus {
        status: StatusKind,
        stacks: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        duration: Option<u32>,
        #[cfg_attr(feature = "serde", serde(default))]
        target: TargetSelector,
    },

    // ========================================================================
    // Run resources
    // ========================================================================
    GainDivineFavor { amount: u32 },
    GainAdamantShards { amount: u32 },

    // ========================================================================
    // Meta
    // ========================================================================
    /// Ask the player to pick a hand card to upgrade for this combat.
    ///
    /// Does not resolve immediately: it raises a pending selection that a
    /// follow-up command must settle.
    UpgradeCard,
}

/// A single effect with its repetition count.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default = "super::default_times"))]
    pub times: u32,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self { kind, times: 1 }
    }

    /// Repeats the effect body `times` times (0 is treated as 1).
    #[must_use]
    pub fn repeated(mut self, times: u32) -> Self {
        self.times = times.max(1);
        self
    }

    pub fn damage(amount: u32) -> Self {
        Self::new(EffectKind::Damage {
            amount,
            target: TargetSelector::Enemy,
        })
    }

    pub fn damage_all(amount: u32) -> Self {
        Self::new(EffectKind::Damage {
            amount,
            target: TargetSelector::AllEnemies,
        })
    }

    pub fn damage_random(amount: u32) -> Self {
        Self::new(EffectKind::Damage {
            amount,
            target: TargetSelector::RandomEnemy,
        })
    }

    pub fn block(amount: u32) -> Self {
        Self::new(EffectKind::Block { amount })
    }

    pub fn heal(amount: u32) -> Self {
        Self::new(EffectKind::Heal { amount })
    }

    pub fn draw(count: u32) -> Self {
        Self::new(EffectKind::Draw { count })
    }

    pub fn gain_energy(amount: u32) -> Self {
        Self::new(EffectKind::GainEnergy { amount })
    }

    pub fn lose_hp(amount: u32) -> Self {
        Self::new(EffectKind::LoseHp { amount })
    }

    pub fn apply_status(
        status: StatusKind,
        stacks: u32,
        duration: Option<u32>,
        target: TargetSelector,
    ) -> Self {
        Self::new(EffectKind::ApplyStatus {
            status,
            stacks,
            duration,
            target,
        })
    }

    pub fn gain_divine_favor(amount: u32) -> Self {
        Self::new(EffectKind::GainDivineFavor { amount })
    }

    pub fn gain_adamant_shards(amount: u32) -> Self {
        Self::new(EffectKind::GainAdamantShards { amount })
    }

    pub fn upgrade_card() -> Self {
        Self::new(EffectKind::UpgradeCard)
    }

    /// Number of applications, never less than one.
    pub fn repetitions(&self) -> u32 {
        self.times.max(1)
    }
}
