//! Looking up the target value for a named check.

use coc_core::skills::{UMBRELLA_SKILLS, category_minimum};
use coc_core::{BalanceState, Characteristic, CharacterRecord};
use serde::{Deserialize, Serialize};

/// The difficulty class and display label a check name resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedCheck {
    pub dc: u32,
    pub label: String,
}

impl ResolvedCheck {
    fn new(dc: u32, label: impl Into<String>) -> Self {
        Self {
            dc,
            label: label.into(),
        }
    }
}

/// Rolls that are not skills but have a fixed source.
const SPECIAL_ROLLS: [&str; 4] = ["know", "idea", "luck", "spellcasting"];

/// Resolve a check name against a character.
///
/// The name matches anything it is a substring of, case-insensitively.
/// Characteristics are tried first, then the sheet's skills in sheet
/// order, then the special rolls, then umbrella categories at their
/// minimum. The first hit wins.
pub fn resolve_check(
    check_name: &str,
    record: &CharacterRecord,
    balances: &BalanceState,
) -> Option<ResolvedCheck> {
    let query = check_name.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let chars = &record.characteristics;
    if let Some(c) = Characteristic::ALL
        .into_iter()
        .find(|c| c.abbrev().contains(&query) || c.full_name().contains(&query))
    {
        return Some(ResolvedCheck::new(chars.get(c), c.label()));
    }

    if let Some(skill) = record
        .skills
        .iter()
        .find(|s| s.name.to_lowercase().contains(&query))
    {
        return Some(ResolvedCheck::new(skill.value, skill.name.as_str()));
    }

    if let Some(special) = SPECIAL_ROLLS.into_iter().find(|s| s.contains(&query)) {
        let resolved = match special {
            "know" => ResolvedCheck::new(chars.edu, "Know"),
            "idea" => ResolvedCheck::new(chars.int, "Idea"),
            "luck" => ResolvedCheck::new(balances.luck, "Luck"),
            _ => ResolvedCheck::new(chars.pow, "Spellcasting"),
        };
        return Some(resolved);
    }

    UMBRELLA_SKILLS
        .iter()
        .find(|u| u.to_lowercase().contains(&query))
        .map(|u| ResolvedCheck::new(category_minimum(u), *u))
}

/// Parse a bare query as a literal difficulty class.
pub fn blind_dc(query: &str) -> Option<u32> {
    let query = query.trim();
    if query.is_empty() || !query.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    query.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::investigator;

    fn resolve(name: &str) -> Option<ResolvedCheck> {
        let record = investigator();
        let balances = BalanceState::for_record(&record);
        resolve_check(name, &record, &balances)
    }

    #[test]
    fn characteristic_by_abbreviation_and_name() {
        assert_eq!(resolve("str"), Some(ResolvedCheck::new(45, "STR")));
        assert_eq!(resolve("Intelligence"), Some(ResolvedCheck::new(55, "INT")));
        assert_eq!(resolve("pow"), Some(ResolvedCheck::new(45, "POW")));
    }

    #[test]
    fn characteristics_win_over_skills() {
        // "app" is also inside "Appraise".
        assert_eq!(resolve("app").map(|r| r.label), Some("APP".to_string()));
    }

    #[test]
    fn skill_substring_in_sheet_order() {
        assert_eq!(resolve("spot"), Some(ResolvedCheck::new(60, "Spot Hidden")));
        assert_eq!(resolve("biology"), Some(ResolvedCheck::new(40, "Science (Biology)")));
        assert_eq!(resolve("stamp"), Some(ResolvedCheck::new(30, "Stamp Collecting")));
        // "Language (Own)" comes before any specialization.
        assert_eq!(resolve("language").map(|r| r.label), Some("Language (Own)".to_string()));
    }

    #[test]
    fn special_rolls() {
        assert_eq!(resolve("know"), Some(ResolvedCheck::new(65, "Know")));
        assert_eq!(resolve("idea"), Some(ResolvedCheck::new(55, "Idea")));
        assert_eq!(resolve("luck"), Some(ResolvedCheck::new(50, "Luck")));
        assert_eq!(resolve("spellcasting"), Some(ResolvedCheck::new(45, "Spellcasting")));
    }

    #[test]
    fn luck_uses_current_balance() {
        let record = investigator();
        let mut balances = BalanceState::for_record(&record);
        balances.luck = 12;
        let resolved = resolve_check("luck", &record, &balances);
        assert_eq!(resolved.map(|r| r.dc), Some(12));
    }

    #[test]
    fn umbrella_falls_back_to_minimum() {
        assert_eq!(resolve("pilot"), Some(ResolvedCheck::new(1, "Pilot")));
        assert_eq!(resolve("survival"), Some(ResolvedCheck::new(10, "Survival")));
    }

    #[test]
    fn unknown_and_empty_do_not_resolve() {
        assert_eq!(resolve("san"), None);
        assert_eq!(resolve("xyzzy"), None);
        assert_eq!(resolve("   "), None);
    }

    #[test]
    fn blind_dc_needs_digits_only() {
        assert_eq!(blind_dc("45"), Some(45));
        assert_eq!(blind_dc(" 7 "), Some(7));
        assert_eq!(blind_dc("-5"), None);
        assert_eq!(blind_dc("4d6"), None);
        assert_eq!(blind_dc(""), None);
        assert_eq!(blind_dc("99999999999999999999"), None);
    }
}
