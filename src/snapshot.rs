//! Serializable lesson snapshots and their on-disk JSON form

use crate::component::{Component, ComponentId};
use crate::error::{BuilderError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const BACKUP_SUFFIX: &str = ".backup";
const TEMP_SUFFIX: &str = ".tmp";

/// Everything needed to restore a builder: components in order plus the
/// selection cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub components: Vec<Component>,
    pub selected_component: Option<ComponentId>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save snapshot to file with atomic write and backup
    pub fn save(&self, path: &Path) -> Result<()> {
        if path.exists() {
            let backup_path = sibling_path(path, BACKUP_SUFFIX);
            fs::copy(path, &backup_path)
                .map_err(|e| BuilderError::Io(format!("Failed to create backup: {}", e)))?;
        }

        let json = self.to_json()?;

        let temp_path = sibling_path(path, TEMP_SUFFIX);
        let mut file = File::create(&temp_path)
            .map_err(|e| BuilderError::Io(format!("Failed to create temp file: {}", e)))?;
        file.write_all(json.as_bytes())
            .map_err(|e| BuilderError::Io(format!("Failed to write lesson: {}", e)))?;
        file.sync_all()
            .map_err(|e| BuilderError::Io(format!("Failed to sync file: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, path)
            .map_err(|e| BuilderError::Io(format!("Failed to finalize write: {}", e)))?;

        info!(path = %path.display(), components = self.components.len(), "lesson saved");
        Ok(())
    }

    /// Load snapshot from file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| BuilderError::Io(format!("Failed to read lesson: {}", e)))?;
        let snapshot = Self::from_json(&contents)?;
        info!(path = %path.display(), components = snapshot.components.len(), "lesson loaded");
        Ok(snapshot)
    }

    /// Load from path, or return an empty snapshot if the file doesn't exist
    pub fn load_or_empty(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// `path` with `suffix` appended to its full file name.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
