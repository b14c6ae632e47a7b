//! Status effects attached to the player or an enemy.
//!
//! Only the bookkeeping lives here: effects accumulate by additive stacking.
//! What a status actually does to damage, block, or energy is left to content
//! hooks; the resolver never reads stacks when computing numbers.

use strum::{Display, EnumIter, EnumString};

/// Types of status effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "camelCase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum StatusKind {
    // ========================================================================
    // Buffs
    // ========================================================================
    Strength,
    Dexterity,
    Vigor,
    Energized,
    DivineBlessing,
    Sharpened,
    Fortified,

    // ========================================================================
    // Debuffs
    // ========================================================================
    Vulnerable,
    Weak,
    Burn,
    BrokenArmor,
    Stunned,
    Marked,

    // ========================================================================
    // Special
    // ========================================================================
    Frozen,
}

impl StatusKind {
    pub const fn is_debuff(&self) -> bool {
        matches!(
            self,
            Self::Vulnerable
                | Self::Weak
                | Self::Burn
                | Self::BrokenArmor
                | Self::Stunned
                | Self::Marked
        )
    }
}

/// A single status with its stack count and optional remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    pub stacks: u32,
    pub duration: Option<u32>,
}

/// Active status effects on an actor, at most one entry per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a status using additive stacking.
    ///
    /// Stacks are summed. Durations are summed when both sides carry one;
    /// otherwise whichever side has a duration keeps it.
    pub fn apply(&mut self, kind: StatusKind, stacks: u32, duration: Option<u32>) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            existing.stacks = existing.stacks.saturating_add(stacks);
            existing.duration = match (existing.duration, duration) {
                (Some(current), Some(extra)) => Some(current.saturating_add(extra)),
                (current, extra) => current.or(extra),
            };
            return;
        }

        self.effects.push(StatusEffect {
            kind,
            stacks,
            duration,
        });
    }

    /// Stack count for a kind (0 when absent).
    pub fn stacks(&self, kind: StatusKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.stacks)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn remove(&mut self, kind: StatusKind) {
        self.effects.retain(|e| e.kind != kind);
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacks_accumulate_additively() {
        let mut statuses = StatusEffects::new();
        statuses.apply(StatusKind::Strength, 2, None);
        statuses.apply(StatusKind::Strength, 3, None);

        assert_eq!(statuses.stacks(StatusKind::Strength), 5);
        assert_eq!(statuses.len(), 1);
    }

    #[test]
    fn durations_sum_when_both_present() {
        let mut statuses = StatusEffects::new();
        statuses.apply(StatusKind::Weak, 1, Some(2));
        statuses.apply(StatusKind::Weak, 1, Some(3));
        statuses.apply(StatusKind::Vulnerable, 1, None);
        statuses.apply(StatusKind::Vulnerable, 1, Some(2));

        assert_eq!(statuses.get(StatusKind::Weak).and_then(|e| e.duration), Some(5));
        assert_eq!(
            statuses.get(StatusKind::Vulnerable).and_then(|e| e.duration),
            Some(2)
        );
    }

    #[test]
    fn absent_status_has_zero_stacks() {
        let statuses = StatusEffects::new();
        assert_eq!(statuses.stacks(StatusKind::Burn), 0);
        assert!(statuses.is_empty());
    }

    #[test]
    fn kinds_parse_from_camel_case() {
        assert_eq!("brokenArmor".parse::<StatusKind>(), Ok(StatusKind::BrokenArmor));
        assert_eq!(StatusKind::DivineBlessing.to_string(), "divineBlessing");
        assert!(StatusKind::Weak.is_debuff());
        assert!(!StatusKind::Strength.is_debuff());
    }
}
