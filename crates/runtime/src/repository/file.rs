//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::traits::SaveRepository;
use crate::snapshot::SaveBlob;

/// Stores the save blob as one pretty-printed JSON file.
///
/// Saves go to `<path>.tmp` first and are renamed over the real file, so a
/// crash mid-write leaves the previous save intact.
pub struct FileSaveRepository {
    path: PathBuf,
}

impl FileSaveRepository {
    /// Create a repository writing to `path`. Parent directories are created
    /// on first save.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SaveRepository for FileSaveRepository {
    fn load(&self) -> Result<Option<SaveBlob>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let blob: SaveBlob = serde_json::from_slice(&bytes)?;
        if blob.version > SaveBlob::CURRENT_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: blob.version,
                expected: SaveBlob::CURRENT_VERSION,
            });
        }

        tracing::debug!("Loaded save from {}", self.path.display());

        Ok(Some(blob))
    }

    fn save(&self, blob: &SaveBlob) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        let bytes = serde_json::to_vec_pretty(blob)?;
        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &self.path)?;

        tracing::debug!("Saved game to {}", self.path.display());

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            tracing::debug!("Deleted save {}", self.path.display());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Settings;
    use game_core::ProgressionState;

    fn blob() -> SaveBlob {
        let mut progression = ProgressionState::default();
        progression.record_defeat();
        SaveBlob::new(None, progression, Settings::default())
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FileSaveRepository::new(dir.path().join("save.json"));
        assert!(repo.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_and_clear() {
        let dir = tempfile::tempdir().expect("temp dir");
        let repo = FileSaveRepository::new(dir.path().join("nested/save.json"));

        repo.save(&blob()).expect("save");
        assert!(!repo.temp_path().exists());
        assert_eq!(repo.load().expect("load"), Some(blob()));

        repo.clear().expect("clear");
        assert!(repo.load().expect("load").is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("save.json");
        fs::write(&path, b"{ not json").expect("write");

        let repo = FileSaveRepository::new(&path);
        assert!(matches!(repo.load(), Err(RepositoryError::Json(_))));
    }

    #[test]
    fn newer_versions_are_refused() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("save.json");
        fs::write(&path, br#"{ "version": 99 }"#).expect("write");

        let repo = FileSaveRepository::new(&path);
        assert!(matches!(
            repo.load(),
            Err(RepositoryError::UnsupportedVersion { found: 99, .. })
        ));
    }
}
