use std::collections::BTreeSet;

/// Counters and unlocks that outlive any single run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionState {
    pub runs_completed: u32,
    pub runs_won: u32,
    pub ascension_level: u32,
    pub unlocked_cards: BTreeSet<String>,
    pub unlocked_artifacts: BTreeSet<String>,
    pub unlocked_npcs: BTreeSet<String>,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A run ended with the player's death.
    pub fn record_defeat(&mut self) {
        self.runs_completed = self.runs_completed.saturating_add(1);
    }

    /// A run ended by defeating the act boss.
    pub fn record_victory(&mut self) {
        self.runs_completed = self.runs_completed.saturating_add(1);
        self.runs_won = self.runs_won.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn victories_also_count_as_completed_runs() {
        let mut progression = ProgressionState::new();
        progression.record_defeat();
        progression.record_victory();

        assert_eq!(progression.runs_completed, 2);
        assert_eq!(progression.runs_won, 1);
    }
}
