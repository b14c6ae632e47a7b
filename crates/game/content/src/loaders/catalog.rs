//! Content catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::{CardDefinition, EnemyDefinition};
use serde::{Deserialize, Serialize};

use crate::catalog::ContentCatalog;
use crate::events::EventDefinition;
use crate::loaders::{LoadResult, read_file};

/// Catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub cards: Vec<CardDefinition>,
    pub enemies: Vec<EnemyDefinition>,
    #[serde(default)]
    pub events: Vec<EventDefinition>,
    pub starting_deck: Vec<String>,
}

/// Loader for content catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<ContentCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in catalog {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<ContentCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON: {}", e))?;

        let catalog = ContentCatalog::new(file.cards, file.enemies, file.events, file.starting_deck);
        catalog.validate()?;
        Ok(catalog)
    }
}
