//! Repository layer for persisted run data
//!
//! Repositories handle data that CHANGES during play: the active run,
//! cross-run progression, and settings, stored together as one blob.
//!
//! Static game content (cards, enemies, events) lives in `game-content`.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;
pub use traits::SaveRepository;
