//! Repository contract for the persisted save blob.

use super::error::Result;
use crate::snapshot::SaveBlob;

/// Storage for the single named save blob.
///
/// Writes are best-effort snapshots of the latest committed state; there is
/// no history and no transaction with the in-memory store.
pub trait SaveRepository: Send + Sync {
    /// Load the blob. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<SaveBlob>>;

    /// Replace the stored blob.
    fn save(&self, blob: &SaveBlob) -> Result<()>;

    /// Remove the stored blob if present.
    fn clear(&self) -> Result<()>;
}
