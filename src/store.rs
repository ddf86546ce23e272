//! Key-value persistence for game settings.

use derive_more::{Display, Error};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use sugoroku_engine::GameSettings;
use tracing::{debug, info, instrument, warn};

/// Key under which [`SettingsRepository`] keeps the game settings.
pub const SETTINGS_KEY: &str = "sugoroku.settings";

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Deletes a value. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing storage cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a flat TOML table of strings.
///
/// The whole file is read on every access and rewritten on every change.
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl TomlFileStore {
    /// Creates a store over `path`. The file is created on first write.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn new(path: PathBuf) -> Self {
        info!("Creating TOML file store");
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Store file missing, treating as empty");
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to read '{}': {}", self.path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| StoreError::new(format!("Failed to parse '{}': {}", self.path.display(), e)))
    }

    fn write_table(&self, table: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let content =
            toml::to_string(table).map_err(|e| StoreError::new(format!("Failed to encode store: {}", e)))?;
        std::fs::write(&self.path, content)
            .map_err(|e| StoreError::new(format!("Failed to write '{}': {}", self.path.display(), e)))
    }
}

impl KeyValueStore for TomlFileStore {
    #[instrument(skip(self))]
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_table()?.remove(key))
    }

    #[instrument(skip(self, value))]
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.read_table()?;
        table.insert(key.to_string(), value.to_string());
        self.write_table(&table)?;
        debug!("Value stored");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.read_table()?;
        if table.remove(key).is_some() {
            self.write_table(&table)?;
        }
        Ok(())
    }
}

/// Loads and saves [`GameSettings`] through a [`KeyValueStore`].
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for SettingsRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsRepository").finish_non_exhaustive()
    }
}

impl SettingsRepository {
    /// Creates a repository over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Repository over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Loads the saved settings.
    ///
    /// Nothing saved yet, or an unreadable saved value, yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only if the store itself fails.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<GameSettings, StoreError> {
        let Some(raw) = self.store.get(SETTINGS_KEY)? else {
            debug!("No saved settings, using defaults");
            return Ok(GameSettings::default());
        };
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!(error = %e, "Saved settings unreadable, using defaults");
                Ok(GameSettings::default())
            }
        }
    }

    /// Saves settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if encoding or the store fails.
    #[instrument(skip(self, settings), fields(difficulty = %settings.difficulty))]
    pub fn save(&self, settings: &GameSettings) -> Result<(), StoreError> {
        let raw = serde_json::to_string(settings)
            .map_err(|e| StoreError::new(format!("Failed to encode settings: {}", e)))?;
        self.store.set(SETTINGS_KEY, &raw)?;
        info!("Settings saved");
        Ok(())
    }

    /// Forgets saved settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the store fails.
    pub fn reset(&self) -> Result<(), StoreError> {
        self.store.remove(SETTINGS_KEY)
    }
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
