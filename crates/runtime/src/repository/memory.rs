//! In-memory SaveRepository implementation for tests and local runs.

use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::SaveRepository;
use crate::snapshot::SaveBlob;

/// Keeps the save blob in memory.
#[derive(Default)]
pub struct InMemorySaveRepository {
    blob: RwLock<Option<SaveBlob>>,
}

impl InMemorySaveRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a blob already stored.
    pub fn with_blob(blob: SaveBlob) -> Self {
        Self {
            blob: RwLock::new(Some(blob)),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn load(&self) -> Result<Option<SaveBlob>> {
        let blob = self.blob.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(blob.clone())
    }

    fn save(&self, blob: &SaveBlob) -> Result<()> {
        let mut stored = self.blob.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = Some(blob.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut stored = self.blob.write().map_err(|_| RepositoryError::LockPoisoned)?;
        *stored = None;
        Ok(())
    }
}
