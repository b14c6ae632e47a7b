//! Run/progression store for the roguelike run engine.
//!
//! This crate wraps the pure rules in `game-core` with everything that needs
//! an owner: mutation ordering, phase transitions between map, combat, and
//! node screens, persistence, and change notification. Consumers embed a
//! [`GameStore`], issue commands, and render the [`GameSnapshot`] each command
//! returns.
//!
//! Modules are organized by responsibility:
//! - [`store`] hosts the command surface and its builder
//! - [`api`] exposes command outcomes and error types
//! - [`snapshot`] defines the read-only views and the save blob
//! - [`events`] provides the change-notification bus
//! - [`repository`] persists the save blob
//! - [`config`] reads runtime configuration from the environment
pub mod api;
pub mod config;
pub mod events;
pub mod repository;
pub mod snapshot;
pub mod store;

pub use api::{
    CommandOutcome, CommandRejection, CommandStatus, Currency, Result, RuntimeError,
};
pub use config::RuntimeConfig;
pub use events::{EventBus, RunEnd, StoreEvent};
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use snapshot::{AnimationSpeed, GamePhase, GameSnapshot, SaveBlob, Settings, SettingsPatch};
pub use store::{GameStore, GameStoreBuilder};
