//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use anyhow::Context;
use game_content::ConfigLoader;
use game_core::GameConfig;

/// Configuration required to build a [`GameStore`](crate::GameStore).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Location of the save blob. `None` when no platform data directory
    /// could be determined.
    pub save_path: Option<PathBuf>,
    /// Write the save blob after every committed change.
    pub enable_persistence: bool,
    /// Capacity of the change-notification channel.
    pub event_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            save_path: default_save_path(),
            enable_persistence: true,
            event_buffer_size: 100,
        }
    }
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FORGE_SAVE_PATH` - Save file location (default: platform data dir)
    /// - `FORGE_PERSISTENCE` - Enable saving (default: true)
    /// - `FORGE_EVENT_BUFFER` - Change notification capacity (default: 100)
    /// - `FORGE_CONFIG` - TOML file overriding balance constants
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("FORGE_SAVE_PATH") {
            config.save_path = Some(PathBuf::from(path));
        }

        if let Some(enable) = read_env::<bool>("FORGE_PERSISTENCE") {
            config.enable_persistence = enable;
        }

        if let Some(capacity) = read_env::<usize>("FORGE_EVENT_BUFFER") {
            config.event_buffer_size = capacity.max(1);
        }

        if let Ok(path) = env::var("FORGE_CONFIG") {
            config.game_config = ConfigLoader::load(path.as_ref())
                .with_context(|| format!("loading FORGE_CONFIG={}", path))?;
        }

        Ok(config)
    }

    /// Configuration for tests and embedding: no file persistence.
    pub fn in_memory() -> Self {
        Self {
            save_path: None,
            enable_persistence: false,
            ..Self::default()
        }
    }
}

/// Platform data directory save file.
///
/// - Linux: `~/.local/share/forge-of-the-fallen/save.json`
/// - macOS: `~/Library/Application Support/forge-of-the-fallen/save.json`
/// - Windows: `%APPDATA%\forge-of-the-fallen\save.json`
pub fn default_save_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "forge-of-the-fallen")
        .map(|dirs| dirs.data_dir().join("save.json"))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_disables_persistence() {
        let config = RuntimeConfig::in_memory();
        assert!(!config.enable_persistence);
        assert!(config.save_path.is_none());
        assert_eq!(config.game_config, GameConfig::default());
    }
}
