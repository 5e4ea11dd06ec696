pub mod balance;
pub mod check;
pub mod import;
pub mod roll;
pub mod roster;
pub mod sheet;

use std::path::PathBuf;

use coc_core::{JsonFileStore, Roster, UserStore};
use coc_mechanics::{CheckEngine, EngineConfig};

/// Store, user, and engine shared by every command.
pub struct Session {
    store: JsonFileStore,
    user: String,
    pub engine: CheckEngine,
}

impl Session {
    pub fn new(store: PathBuf, user: String, seed: Option<u64>) -> Self {
        let config = match seed {
            Some(seed) => EngineConfig::default().with_seed(seed),
            None => EngineConfig::default(),
        };
        Self {
            store: JsonFileStore::new(store),
            user,
            engine: CheckEngine::new(config),
        }
    }

    /// Load the current user's roster.
    pub fn load(&self) -> Result<Roster, String> {
        tracing::debug!(store = %self.store.path().display(), user = %self.user, "loading roster");
        self.store.load(&self.user).map_err(|e| e.to_string())
    }

    /// Persist the current user's roster.
    pub fn save(&mut self, roster: &Roster) -> Result<(), String> {
        self.store
            .save(&self.user, roster)
            .map_err(|e| e.to_string())
    }

    /// Drop everything stored for the current user.
    pub fn clear(&mut self) -> Result<(), String> {
        tracing::info!(user = %self.user, "clearing stored characters");
        self.store.clear(&self.user).map_err(|e| e.to_string())
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}
