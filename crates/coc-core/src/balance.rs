//! Mutable resource pools: luck, sanity, health, and magic points.
//!
//! Pools are created from the characteristics at import and clamped,
//! never raised, when an update shrinks their maxima.

use serde::{Deserialize, Serialize};

use crate::character::CharacterRecord;
use crate::skills::SKILL_MAXIMUM;

/// A named resource pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Luck points, spent to shift rolls.
    Luck,
    /// Sanity points, capped by Cthulhu Mythos.
    Sanity,
    /// Hit points.
    Health,
    /// Magic points.
    Magic,
}

impl Resource {
    /// All resources in display order.
    pub const ALL: [Resource; 4] = [Self::Luck, Self::Sanity, Self::Health, Self::Magic];

    /// Parse a resource from a name or common abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "luck" | "lck" => Some(Self::Luck),
            "sanity" | "san" => Some(Self::Sanity),
            "health" | "hp" | "hit points" => Some(Self::Health),
            "magic" | "mp" | "magic points" => Some(Self::Magic),
            _ => None,
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Luck => write!(f, "Luck"),
            Self::Sanity => write!(f, "Sanity"),
            Self::Health => write!(f, "Health"),
            Self::Magic => write!(f, "Magic"),
        }
    }
}

/// Current resource pools for one character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceState {
    pub luck: u32,
    pub sanity: u32,
    pub health: u32,
    pub health_maximum: u32,
    pub magic: u32,
    pub magic_maximum: u32,
}

/// Starting pools derived from POW, CON, SIZ, and the imported luck.
pub fn starting_balances(pow: u32, con: u32, siz: u32, luck: u32) -> BalanceState {
    let magic_maximum = pow / 5;
    let health_maximum = con.saturating_add(siz) / 10;
    BalanceState {
        luck,
        sanity: pow,
        health: health_maximum,
        health_maximum,
        magic: magic_maximum,
        magic_maximum,
    }
}

impl BalanceState {
    /// Starting pools for a freshly imported record, already capped.
    pub fn for_record(record: &CharacterRecord) -> Self {
        let chars = &record.characteristics;
        let mut state = starting_balances(chars.pow, chars.con, chars.siz, record.luck);
        state.clamp_to_maxima(record.mythos());
        state
    }

    fn clamp_to_maxima(&mut self, mythos: u32) {
        for resource in Resource::ALL {
            let cap = self.maximum(resource, mythos);
            if self.get(resource) > cap {
                self.set(resource, cap);
            }
        }
    }

    /// Current value of a pool.
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Luck => self.luck,
            Resource::Sanity => self.sanity,
            Resource::Health => self.health,
            Resource::Magic => self.magic,
        }
    }

    /// Overwrite the current value of a pool.
    pub fn set(&mut self, resource: Resource, value: u32) {
        match resource {
            Resource::Luck => self.luck = value,
            Resource::Sanity => self.sanity = value,
            Resource::Health => self.health = value,
            Resource::Magic => self.magic = value,
        }
    }

    /// Upper bound of a pool. Sanity is capped at 99 minus Cthulhu Mythos.
    pub fn maximum(&self, resource: Resource, mythos: u32) -> u32 {
        match resource {
            Resource::Luck => SKILL_MAXIMUM,
            Resource::Sanity => SKILL_MAXIMUM.saturating_sub(mythos),
            Resource::Health => self.health_maximum,
            Resource::Magic => self.magic_maximum,
        }
    }

    /// Recompute maxima after the record was replaced.
    ///
    /// Current values only move down: a pool above its new maximum is
    /// clamped, a pool below it is left alone.
    pub fn apply_update(&mut self, record: &CharacterRecord) {
        let fresh = Self::for_record(record);
        self.health_maximum = fresh.health_maximum;
        self.magic_maximum = fresh.magic_maximum;
        self.clamp_to_maxima(record.mythos());
    }
}
