use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Note, Notebook, Settings};

const NOTES_FILE: &str = "notes.json";
const NOTEBOOKS_FILE: &str = "notebooks.json";
const SETTINGS_FILE: &str = "settings.json";

/// Everything the persisted store holds, as loaded in one shot.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    pub notes: HashMap<String, Note>,
    pub notebooks: HashMap<String, Notebook>,
    pub settings: Settings,
}

/// Key-value adapter over three independent JSON documents on disk.
///
/// There is no partial-write protection, no versioning and no migration
/// path: a corrupt stored value fails the load and initialization aborts.
#[derive(Debug)]
pub struct StorageManager {
    data_dir: PathBuf,
    notes_file: PathBuf,
    notebooks_file: PathBuf,
    settings_file: PathBuf,
}

impl StorageManager {
    pub fn new() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .context("Failed to get data directory")?
            .join("filament");
        Self::with_root(&data_dir)
    }

    /// Builds the adapter over an explicit directory. Tests point this at a
    /// disposable location.
    pub fn with_root(root: &Path) -> Result<Self> {
        fs::create_dir_all(root)
            .with_context(|| format!("Failed to create data directory {}", root.display()))?;

        Ok(Self {
            data_dir: root.to_path_buf(),
            notes_file: root.join(NOTES_FILE),
            notebooks_file: root.join(NOTEBOOKS_FILE),
            settings_file: root.join(SETTINGS_FILE),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn exports_dir(&self) -> PathBuf {
        self.data_dir.join("exports")
    }

    /// Reads the three keys. A missing notes document defaults to an empty
    /// map, missing notebooks default to the seeded `default` notebook and
    /// missing settings default to the fixed configuration record.
    pub fn load(&self) -> Result<StoreSnapshot> {
        let notes = match self.read_document(&self.notes_file)? {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse notes document")?,
            None => HashMap::new(),
        };

        let notebooks = match self.read_document(&self.notebooks_file)? {
            Some(raw) => {
                serde_json::from_str(&raw).context("Failed to parse notebooks document")?
            }
            None => {
                let seeded = Notebook::seed_default();
                HashMap::from([(seeded.id.clone(), seeded)])
            }
        };

        let settings = match self.read_document(&self.settings_file)? {
            Some(raw) => serde_json::from_str(&raw).context("Failed to parse settings document")?,
            None => Settings::default(),
        };

        Ok(StoreSnapshot {
            notes,
            notebooks,
            settings,
        })
    }

    /// Serializes and rewrites all three keys unconditionally.
    pub fn save(
        &self,
        notes: &HashMap<String, Note>,
        notebooks: &HashMap<String, Notebook>,
        settings: &Settings,
    ) -> Result<()> {
        self.write_document(&self.notes_file, notes)?;
        self.write_document(&self.notebooks_file, notebooks)?;
        self.write_document(&self.settings_file, settings)?;
        Ok(())
    }

    fn read_document(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
            .map(Some)
    }

    fn write_document<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize {}", path.display()))?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
    }
}
