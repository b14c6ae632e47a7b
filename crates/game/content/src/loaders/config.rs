//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys keep their defaults, so a file only needs to name the
/// constants it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            starting_hp = 70
            shop_removal_cost = 50

            [map]
            rows = 10
            "#,
        )
        .expect("valid TOML");

        assert_eq!(config.starting_hp, 70);
        assert_eq!(config.shop_removal_cost, 50);
        assert_eq!(config.hand_size, GameConfig::DEFAULT_HAND_SIZE);
        assert_eq!(config.map.rows, 10);
        assert_eq!(config.map.columns, 7);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let err = ConfigLoader::parse("starting_hp = \"lots\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config TOML"));
    }
}
