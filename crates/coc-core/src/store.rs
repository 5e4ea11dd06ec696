//! Persistence of per-user rosters behind a key-value interface.
//!
//! The check engine never touches storage; hosts load a roster, run
//! commands against it, and save it back. Serializing concurrent
//! commands from the same user is the store's responsibility.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CoreResult;
use crate::roster::Roster;

/// Key-value access to rosters by opaque user id.
pub trait UserStore {
    /// Load a user's roster; unknown users get an empty roster.
    fn load(&self, user_id: &str) -> CoreResult<Roster>;

    /// Persist a user's roster, replacing what was there.
    fn save(&mut self, user_id: &str, roster: &Roster) -> CoreResult<()>;

    /// Forget everything stored for a user.
    fn clear(&mut self, user_id: &str) -> CoreResult<()>;
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rosters: HashMap<String, Roster>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for MemoryStore {
    fn load(&self, user_id: &str) -> CoreResult<Roster> {
        Ok(self.rosters.get(user_id).cloned().unwrap_or_default())
    }

    fn save(&mut self, user_id: &str, roster: &Roster) -> CoreResult<()> {
        self.rosters.insert(user_id.to_string(), roster.clone());
        Ok(())
    }

    fn clear(&mut self, user_id: &str) -> CoreResult<()> {
        self.rosters.remove(user_id);
        Ok(())
    }
}

/// A store that keeps every user's roster in one JSON file.
///
/// The whole file is read on each load and rewritten on each save. A
/// missing file is an empty store. Writes go to a sibling temporary file
/// that is renamed over the store, so readers never see a partial file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> CoreResult<HashMap<String, Roster>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let text = fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&text)?)
    }

    fn write_all(&self, all: &HashMap<String, Roster>) -> CoreResult<()> {
        let text = serde_json::to_string_pretty(all)?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), users = all.len(), "store written");
        Ok(())
    }
}

impl UserStore for JsonFileStore {
    fn load(&self, user_id: &str) -> CoreResult<Roster> {
        Ok(self.read_all()?.remove(user_id).unwrap_or_default())
    }

    fn save(&mut self, user_id: &str, roster: &Roster) -> CoreResult<()> {
        let mut all = self.read_all()?;
        all.insert(user_id.to_string(), roster.clone());
        self.write_all(&all)
    }

    fn clear(&mut self, user_id: &str) -> CoreResult<()> {
        let mut all = self.read_all()?;
        if all.remove(user_id).is_some() {
            self.write_all(&all)?;
        }
        Ok(())
    }
}
