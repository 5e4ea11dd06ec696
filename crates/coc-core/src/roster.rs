//! A user's imported characters, their pools, and which one is active.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::balance::BalanceState;
use crate::character::CharacterRecord;
use crate::error::{CoreError, CoreResult};
use crate::validate::validate_record;

static SHEET_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https://docs\.google\.com/spreadsheets/d/e/([0-9A-Za-z_-]+)/pub\?gid=0&single=true&output=csv$",
    )
    .expect("sheet URL pattern is valid")
});

/// Extract the sheet identifier from a published-to-web CSV link.
pub fn sheet_id_from_url(url: &str) -> CoreResult<String> {
    SHEET_URL
        .captures(url.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| CoreError::InvalidSheetUrl(url.to_string()))
}

/// Rebuild the published CSV link for a sheet identifier.
pub fn sheet_url(sheet_id: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/e/{sheet_id}/pub?gid=0&single=true&output=csv"
    )
}

/// An imported character with its pools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredCharacter {
    pub record: CharacterRecord,
    pub balances: BalanceState,
    pub imported_at: DateTime<Utc>,
}

/// One line of [`Roster::listing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLine {
    pub sheet_id: String,
    pub name: String,
    pub active: bool,
}

/// All characters belonging to one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    pub active: Option<String>,
    pub characters: BTreeMap<String, StoredCharacter>,
}

impl Roster {
    /// Validate and add a new character, making it active.
    pub fn import(&mut self, sheet_id: &str, record: CharacterRecord) -> CoreResult<&StoredCharacter> {
        if self.characters.contains_key(sheet_id) {
            return Err(CoreError::AlreadyImported(sheet_id.to_string()));
        }
        validate_record(&record)?;

        tracing::info!(sheet_id, name = %record.name, "importing character");
        let stored = StoredCharacter {
            balances: BalanceState::for_record(&record),
            record,
            imported_at: Utc::now(),
        };
        self.active = Some(sheet_id.to_string());
        Ok(self.characters.entry(sheet_id.to_string()).or_insert(stored))
    }

    /// Replace a character's record wholesale, keeping its pools.
    ///
    /// Pool maxima are recomputed and current values clamped down.
    pub fn update(&mut self, sheet_id: &str, record: CharacterRecord) -> CoreResult<&StoredCharacter> {
        validate_record(&record)?;
        let stored = self
            .characters
            .get_mut(sheet_id)
            .ok_or_else(|| CoreError::CharacterNotFound(sheet_id.to_string()))?;

        tracing::info!(sheet_id, name = %record.name, "updating character");
        stored.balances.apply_update(&record);
        stored.record = record;
        Ok(stored)
    }

    /// Find a sheet identifier by published URL or case-insensitive name fragment.
    pub fn find(&self, query: &str) -> Option<String> {
        if let Ok(id) = sheet_id_from_url(query) {
            return self.characters.contains_key(&id).then_some(id);
        }
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.characters
            .iter()
            .find(|(_, c)| c.record.name.to_lowercase().contains(&needle))
            .map(|(id, _)| id.clone())
    }

    /// Make the character matching `query` active. Returns its name.
    pub fn set_active(&mut self, query: &str) -> CoreResult<&str> {
        let id = self
            .find(query)
            .ok_or_else(|| CoreError::CharacterNotFound(query.to_string()))?;
        self.active = Some(id.clone());
        Ok(&self.characters[&id].record.name)
    }

    /// Remove the character matching `query`. Returns the removed entry.
    pub fn remove(&mut self, query: &str) -> CoreResult<StoredCharacter> {
        let id = self
            .find(query)
            .ok_or_else(|| CoreError::CharacterNotFound(query.to_string()))?;
        if self.active.as_deref() == Some(id.as_str()) {
            self.active = None;
        }
        tracing::info!(sheet_id = %id, "removing character");
        self.characters
            .remove(&id)
            .ok_or(CoreError::CharacterNotFound(id))
    }

    /// The active character.
    pub fn active(&self) -> CoreResult<&StoredCharacter> {
        self.active
            .as_ref()
            .and_then(|id| self.characters.get(id))
            .ok_or(CoreError::NoActiveCharacter)
    }

    /// The active character, mutably.
    pub fn active_mut(&mut self) -> CoreResult<&mut StoredCharacter> {
        self.active
            .as_ref()
            .and_then(|id| self.characters.get_mut(id))
            .ok_or(CoreError::NoActiveCharacter)
    }

    /// Characters sorted by name.
    pub fn listing(&self) -> Vec<RosterLine> {
        let mut lines: Vec<RosterLine> = self
            .characters
            .iter()
            .map(|(id, c)| RosterLine {
                sheet_id: id.clone(),
                name: c.record.name.clone(),
                active: self.active.as_deref() == Some(id.as_str()),
            })
            .collect();
        lines.sort_by(|a, b| a.name.cmp(&b.name));
        lines
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
