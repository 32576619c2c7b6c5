use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

const PREFS_FILENAME: &str = ".newshound_prefs.ron";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Key-value storage for user preferences.
pub trait PrefStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    saved_utc: String,
    entries: BTreeMap<String, String>,
}

/// RON-backed store keeping every preference in one file under `dir`.
/// Loads leniently (missing or corrupt file reads as empty); every `set`
/// rewrites the whole file atomically.
pub struct RonFileStore {
    dir: PathBuf,
    entries: BTreeMap<String, String>,
}

impl RonFileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let entries = load_entries(&dir.join(PREFS_FILENAME));
        Self { dir, entries }
    }

    fn save(&self) -> Result<(), StoreError> {
        let state = PersistedPrefs {
            saved_utc: Utc::now().to_rfc3339(),
            entries: self.entries.clone(),
        };
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(&state, pretty)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        write_atomically(&self.dir, PREFS_FILENAME, &content)
    }
}

impl PrefStore for RonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.save()
    }
}

fn load_entries(path: &Path) -> BTreeMap<String, String> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return BTreeMap::new();
        }
        Err(err) => {
            log::warn!("failed to read preferences from {path:?}: {err}");
            return BTreeMap::new();
        }
    };

    match ron::from_str::<PersistedPrefs>(&content) {
        Ok(state) => {
            log::info!("loaded preferences from {path:?}");
            state.entries
        }
        Err(err) => {
            log::warn!("failed to parse preferences from {path:?}: {err}");
            BTreeMap::new()
        }
    }
}

fn ensure_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir)?;
        if !meta.is_dir() {
            return Err(StoreError::Unavailable("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Writes `{dir}/{filename}` through a temp file plus rename.
fn write_atomically(dir: &Path, filename: &str, content: &str) -> Result<(), StoreError> {
    ensure_dir(dir)?;

    let target = dir.join(filename);
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    // Replace an existing file so the rename lands on every platform.
    if target.exists() {
        fs::remove_file(&target)?;
    }
    tmp.persist(&target).map_err(|err| StoreError::Io(err.error))?;
    Ok(())
}

/// In-memory store; preferences live only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PrefStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One preference bound to a fixed key. Creation reads the stored value,
/// falling back without writing; every `set` writes through best effort,
/// even one that re-asserts the current value, so a failing store degrades
/// to session-local behavior.
pub struct PersistedCell {
    key: String,
    value: String,
    store: Box<dyn PrefStore>,
}

impl PersistedCell {
    pub fn create(key: impl Into<String>, fallback: &str, store: Box<dyn PrefStore>) -> Self {
        let key = key.into();
        let value = store.get(&key).unwrap_or_else(|| fallback.to_owned());
        Self { key, value, store }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: &str) {
        self.value = value.to_owned();
        if let Err(err) = self.store.set(&self.key, value) {
            log::warn!("could not persist {:?}: {err}", self.key);
        }
    }
}
