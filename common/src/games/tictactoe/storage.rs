use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::{
    ConfigContentProvider, ConfigManager, FileContentConfigProvider, MemoryContentProvider,
    Validate, YamlConfigSerializer,
};
use crate::log_warn;
use super::types::{Difficulty, Scores};

/// Fixed key the persisted session settings live under.
pub const STORAGE_KEY: &str = "tictactoe-state";

/// What survives between runs: the chosen tier and the running tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub difficulty: Difficulty,
    pub scores: Scores,
}

impl Validate for PersistedState {
    // Tallies saturate when recorded, so any value that parses is usable.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

pub trait ScoreStore: Send + Sync + 'static {
    /// Never fails: missing or corrupted data yields [`PersistedState::default`].
    fn load(&self) -> PersistedState;

    /// Best effort; failures are logged and dropped.
    fn save(&self, state: &PersistedState);
}

pub struct ConfigScoreStore<TProvider: ConfigContentProvider> {
    manager: ConfigManager<TProvider, PersistedState, YamlConfigSerializer>,
}

pub type MemoryScoreStore = ConfigScoreStore<MemoryContentProvider>;

impl<TProvider: ConfigContentProvider> ConfigScoreStore<TProvider> {
    pub fn new(provider: TProvider) -> Self {
        Self {
            manager: ConfigManager::new(provider, YamlConfigSerializer::new()),
        }
    }
}

impl ConfigScoreStore<FileContentConfigProvider> {
    /// Stores state as `<dir>/tictactoe-state.yaml`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(FileContentConfigProvider::new(
            dir.join(format!("{}.yaml", STORAGE_KEY)),
        ))
    }
}

impl MemoryScoreStore {
    pub fn in_memory() -> Self {
        Self::new(MemoryContentProvider::new())
    }
}

impl<TProvider> ScoreStore for ConfigScoreStore<TProvider>
where
    TProvider: ConfigContentProvider + Send + Sync + 'static,
{
    fn load(&self) -> PersistedState {
        self.manager.load_or_default()
    }

    fn save(&self, state: &PersistedState) {
        if let Err(e) = self.manager.set_config(state) {
            log_warn!("Failed to save {}: {}", STORAGE_KEY, e);
        }
    }
}
