//! Static game content and loaders.
//!
//! This crate houses the built-in content tables and loaders for data files:
//! - Card templates and the starting deck
//! - Act enemies, grouped into basic, elite, and boss pools
//! - Out-of-combat events
//! - Game configuration (data-driven via TOML)
//! - Alternate catalogs (data-driven via RON)
//!
//! Definitions are keyed by identity string and never mutated; the runtime
//! derives instances from them.

pub mod cards;
pub mod catalog;
pub mod enemies;
pub mod events;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{CARD_REWARD_CHOICES, ContentCatalog, ContentError, EncounterKind};
pub use events::{EventDefinition, EventOption, EventOutcome};

#[cfg(feature = "loaders")]
pub use loaders::{CatalogFile, CatalogLoader, ConfigLoader};
