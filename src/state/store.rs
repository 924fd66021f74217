//! StateStore - persistence of the attendance round

use crate::models::AttendanceState;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Default location of the state file, relative to the working directory
pub const DEFAULT_DATA_FILE: &str = "data.json";

/// Result type for state store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur when reading or writing the state file
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse state file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to persist state file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Reads and writes the attendance state as a flat JSON record
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state, never failing
    ///
    /// A missing or unreadable file starts a fresh round. A corrupt file is
    /// also moved aside to `<file>.bak` first.
    pub fn load(&self) -> AttendanceState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::debug!(path = %self.path.display(), "No state file, starting a fresh round");
                AttendanceState::new()
            }
            Err(StoreError::Parse(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt state file, starting a fresh round"
                );
                self.backup_corrupt();
                AttendanceState::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Could not read state file, starting a fresh round"
                );
                AttendanceState::new()
            }
        }
    }

    /// Load the persisted state, returning `None` if the file does not exist
    pub fn try_load(&self) -> StoreResult<Option<AttendanceState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let state = serde_json::from_str(&content)?;
        Ok(Some(state))
    }

    /// Overwrite the state file with the full state
    ///
    /// Writes a temporary file next to the target and renames it into place.
    pub fn save(&self, state: &AttendanceState) -> StoreResult<()> {
        let content = serde_json::to_string(state)?;

        let parent = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut temp_file = NamedTempFile::new_in(parent)?;
        temp_file.write_all(content.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path)?;

        Ok(())
    }

    /// `<file>.bak`, whatever the file's own extension
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn backup_corrupt(&self) {
        if !self.path.exists() {
            return;
        }
        let backup_path = self.backup_path();
        if let Err(e) = fs::rename(&self.path, &backup_path) {
            tracing::warn!(error = %e, "Failed to back up corrupt state file");
        }
    }
}
