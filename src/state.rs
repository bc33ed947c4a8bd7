use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::version::EditorVersion;

const STATE_FORMAT_VERSION: u32 = 1;

/// An editor that is installed, or being installed, through the hub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledEntry {
    pub version: EditorVersion,
    pub path: PathBuf,
    #[serde(default)]
    pub installing: bool,
}

/// Durable home of the tracked install list.
pub trait SettingsStore {
    fn load(&self) -> Result<Vec<InstalledEntry>>;
    fn persist(&mut self, entries: &[InstalledEntry]) -> Result<()>;
}

/// On-disk format of the install state file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallState {
    /// Version of the state file format
    version: u32,
    pub metadata: Metadata,
    #[serde(default)]
    pub installs: Vec<InstalledEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// When the install list last changed
    pub updated_at: String,
}

impl Default for InstallState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl InstallState {
    pub fn new(installs: Vec<InstalledEntry>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: STATE_FORMAT_VERSION,
            metadata: Metadata { updated_at: now },
            installs,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read install state from {:?}", path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse install state from {:?}", path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {:?}", parent))?;
        }

        let contents =
            toml::to_string_pretty(self).context("Failed to serialize install state")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write install state to {:?}", path))?;

        Ok(())
    }
}

/// [`SettingsStore`] backed by a TOML file.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for StateFile {
    fn load(&self) -> Result<Vec<InstalledEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        Ok(InstallState::load(&self.path)?.installs)
    }

    fn persist(&mut self, entries: &[InstalledEntry]) -> Result<()> {
        InstallState::new(entries.to_vec()).save(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(raw: &str, installing: bool) -> InstalledEntry {
        InstalledEntry {
            version: EditorVersion::parse(raw),
            path: PathBuf::from("/editors").join(raw),
            installing,
        }
    }

    #[test]
    fn state_new_is_empty() {
        let state = InstallState::default();
        assert_eq!(state.version, STATE_FORMAT_VERSION);
        assert!(!state.metadata.updated_at.is_empty());
        assert!(state.installs.is_empty());
    }

    #[test]
    fn missing_state_file_loads_empty() {
        let temp = TempDir::new().unwrap();
        let store = StateFile::new(temp.path().join("installs.toml"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn persist_preserves_order_and_flags() {
        let temp = TempDir::new().unwrap();
        let mut store = StateFile::new(temp.path().join("state/installs.toml"));
        let entries = vec![entry("2022.1.0f1", false), entry("2021.3.5f1", true)];

        store.persist(&entries).unwrap();
        assert!(store.path().exists());

        let loaded = store.load().unwrap();
        assert_eq!(loaded, entries);
        assert_eq!(loaded[1].version.patch(), 5);
        assert!(loaded[1].installing);
    }

    #[test]
    fn state_file_is_keyed_by_raw_version() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installs.toml");
        let mut store = StateFile::new(&path);
        store.persist(&[entry("2021.3.5f1", false)]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[[installs]]"));
        assert!(contents.contains("version = \"2021.3.5f1\""));
        assert!(contents.contains("updated_at"));
    }

    #[test]
    fn corrupt_state_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("installs.toml");
        fs::write(&path, "installs = 3").unwrap();

        let err = StateFile::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse install state"));
    }
}
