//! Read-only views of the store and the persisted save blob.
//!
//! The presentation layer never sees the store's internals. It receives a
//! [`GameSnapshot`] after every command and re-renders from it; the same data
//! minus the phase and revision is what gets written to disk as a
//! [`SaveBlob`].

use game_core::{ProgressionState, RunState};
use serde::{Deserialize, Serialize};

/// Which screen the run is on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GamePhase {
    /// No active run.
    #[default]
    Menu,
    Map,
    Combat,
    /// A won combat's spoils await `claim_reward` or `leave_node`.
    Reward,
    Shop,
    Rest,
    Event,
    GameOver,
    Victory,
}

impl GamePhase {
    /// Phases that are left by returning to the map.
    pub const fn is_node_screen(&self) -> bool {
        matches!(self, Self::Reward | Self::Shop | Self::Rest | Self::Event)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

/// Player preferences. Persisted with the run but never read by the rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub master_volume: f64,
    pub sfx_volume: f64,
    pub music_volume: f64,
    pub animation_speed: AnimationSpeed,
    pub screen_shake: bool,
    pub confirm_end_turn: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 0.8,
            music_volume: 0.6,
            animation_speed: AnimationSpeed::Normal,
            screen_shake: true,
            confirm_end_turn: false,
        }
    }
}

/// Partial settings update; `None` fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub master_volume: Option<f64>,
    pub sfx_volume: Option<f64>,
    pub music_volume: Option<f64>,
    pub animation_speed: Option<AnimationSpeed>,
    pub screen_shake: Option<bool>,
    pub confirm_end_turn: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the patch into `settings`. Volumes are clamped to `[0, 1]`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(volume) = self.master_volume {
            settings.master_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(volume) = self.sfx_volume {
            settings.sfx_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(volume) = self.music_volume {
            settings.music_volume = volume.clamp(0.0, 1.0);
        }
        if let Some(speed) = self.animation_speed {
            settings.animation_speed = speed;
        }
        if let Some(shake) = self.screen_shake {
            settings.screen_shake = shake;
        }
        if let Some(confirm) = self.confirm_end_turn {
            settings.confirm_end_turn = confirm;
        }
    }
}

/// Immutable view of the store after a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Bumped once per committed change.
    pub revision: u64,
    pub phase: GamePhase,
    pub run: Option<RunState>,
    pub progression: ProgressionState,
    pub settings: Settings,
    /// A card asked for an upgrade target; the next combat command must be
    /// `upgrade_card_in_hand` or `cancel_upgrade`.
    pub pending_upgrade: bool,
}

impl GameSnapshot {
    pub fn combat(&self) -> Option<&game_core::CombatState> {
        self.run.as_ref().and_then(|run| run.combat.as_ref())
    }

    pub fn player(&self) -> Option<&game_core::PlayerState> {
        self.run.as_ref().map(|run| &run.player)
    }
}

/// The single persisted blob.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveBlob {
    pub version: u32,
    #[serde(default)]
    pub run: Option<RunState>,
    #[serde(default)]
    pub progression: ProgressionState,
    #[serde(default)]
    pub settings: Settings,
}

impl SaveBlob {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn new(run: Option<RunState>, progression: ProgressionState, settings: Settings) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            run,
            progression,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_named_fields() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            music_volume: Some(1.7),
            screen_shake: Some(false),
            ..SettingsPatch::default()
        };

        patch.apply(&mut settings);

        assert_eq!(settings.music_volume, 1.0);
        assert!(!settings.screen_shake);
        assert_eq!(settings.master_volume, 0.8);
        assert_eq!(settings.animation_speed, AnimationSpeed::Normal);
    }

    #[test]
    fn blob_without_run_parses_with_defaults() {
        let blob: SaveBlob = serde_json::from_str(r#"{ "version": 1 }"#).expect("valid blob");
        assert!(blob.run.is_none());
        assert_eq!(blob.progression, ProgressionState::default());
        assert_eq!(blob.settings, Settings::default());
    }
}
