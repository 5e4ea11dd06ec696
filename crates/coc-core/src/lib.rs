//! Character data for the coc check assistant.
//!
//! Holds the typed character record imported from the published sheet,
//! the sheet's fixed skill tables, derived combat stats, the mutable
//! resource pools, and per-user rosters behind a storage interface.
//! Nothing here rolls dice; see `coc-mechanics` for that.

/// Resource pools and their start/update rules.
pub mod balance;
/// The typed character record.
pub mod character;
/// Damage bonus, build, and movement rate.
pub mod derived;
/// Error types used throughout the crate.
pub mod error;
/// Fixed-coordinate decoder for the sheet's CSV export.
pub mod layout;
/// Per-user character rosters.
pub mod roster;
/// Fixed skill tables.
pub mod skills;
/// Storage interface for rosters.
pub mod store;
/// Sheet invariant checks.
pub mod validate;

pub use balance::{BalanceState, Resource, starting_balances};
pub use character::{Characteristic, Characteristics, CharacterRecord, Skill, SkillKind};
pub use derived::{DamageBonus, DerivedStats, damage_build_move};
pub use error::{CoreError, CoreResult};
pub use layout::{decode_grid, parse_csv};
pub use roster::{Roster, RosterLine, StoredCharacter, sheet_id_from_url, sheet_url};
pub use store::{JsonFileStore, MemoryStore, UserStore};
pub use validate::{ValidationErrors, ValidationIssue, validate_record};
