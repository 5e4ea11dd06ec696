//! Validation of imported character data.
//!
//! Every invariant is checked and every violation is reported, so a
//! player can fix the whole sheet in one pass.

use serde::{Deserialize, Serialize};

use crate::character::{Characteristic, CharacterRecord};
use crate::skills::{POINT_BUY_TOTAL, SKILL_MAXIMUM, category_minimum};

/// A single violated sheet invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The sheet field the issue was found in.
    pub field: String,
    /// A human-readable description of the issue.
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All issues found in one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(ValidationIssue::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lines: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Check a record against the sheet invariants.
pub fn validate_record(record: &CharacterRecord) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if record.name.trim().is_empty() {
        errors.push("name", "character name is empty");
    }

    for ch in Characteristic::ALL {
        let value = record.characteristics.get(ch);
        if value % 5 != 0 {
            errors.push(ch.label(), format!("{value} is not a multiple of 5"));
        }
        if value > SKILL_MAXIMUM {
            errors.push(ch.label(), format!("{value} is above {SKILL_MAXIMUM}"));
        }
    }
    if record.luck % 5 != 0 {
        errors.push("luck", format!("{} is not a multiple of 5", record.luck));
    }
    if record.luck > SKILL_MAXIMUM {
        errors.push("luck", format!("{} is above {SKILL_MAXIMUM}", record.luck));
    }

    let total = record.characteristics.sum() + u64::from(record.luck);
    if total != u64::from(POINT_BUY_TOTAL) {
        errors.push(
            "characteristics",
            format!("characteristics and luck total {total}, expected {POINT_BUY_TOTAL}"),
        );
    }

    for (slot, talent) in record.talents.iter().enumerate() {
        if talent.trim().is_empty() {
            errors.push(format!("talent {}", slot + 1), "talent slot is empty");
        }
    }
    let [first, second] = &record.talents;
    if !first.trim().is_empty() && first.trim() == second.trim() {
        errors.push("talents", format!("'{first}' is chosen twice"));
    }

    for skill in &record.skills {
        let min = category_minimum(&skill.name);
        if skill.value < min || skill.value > SKILL_MAXIMUM {
            errors.push(
                skill.name.clone(),
                format!("{} is outside [{min}, {SKILL_MAXIMUM}]", skill.value),
            );
        }
    }

    errors.into_result()
}
