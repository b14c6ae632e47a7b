use std::fmt;

/// Unique identity of a card instance within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstanceId(pub u64);

impl fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// Unique identity of an enemy instance within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyInstanceId(pub u64);

impl fmt::Display for EnemyInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enemy#{}", self.0)
    }
}

/// Sequential instance id allocator (monotonically increasing, never reused).
///
/// Card and enemy ids share one counter so an id is unique across both kinds
/// for the lifetime of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceIdAllocator {
    next: u64,
}

impl InstanceIdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    fn allocate(&mut self) -> u64 {
        // Zero is never handed out so a default-constructed id stands out.
        if self.next == 0 {
            self.next = 1;
        }
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }

    pub fn next_card(&mut self) -> CardInstanceId {
        CardInstanceId(self.allocate())
    }

    pub fn next_enemy(&mut self) -> EnemyInstanceId {
        EnemyInstanceId(self.allocate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_kinds() {
        let mut ids = InstanceIdAllocator::new();
        let card = ids.next_card();
        let enemy = ids.next_enemy();
        let card2 = ids.next_card();

        assert_ne!(card.0, enemy.0);
        assert_ne!(enemy.0, card2.0);
        assert!(card2.0 > card.0);
    }

    #[test]
    fn default_allocator_skips_zero() {
        let mut ids = InstanceIdAllocator::default();
        assert_eq!(ids.next_card(), CardInstanceId(1));
    }
}
