//! Shared fixtures for unit tests.

use coc_core::skills::{DEFAULT_SKILLS, skill_minimum};
use coc_core::{Characteristics, CharacterRecord, Skill, SkillKind};

/// A valid investigator with a few trained skills and two talents.
pub fn investigator() -> CharacterRecord {
    let mut record = CharacterRecord {
        name: "Harvey Walters".to_string(),
        archetype: "Egghead".to_string(),
        occupation_skill: "Library Use".to_string(),
        psychic_power: None,
        talents: ["Keen Vision".to_string(), "Linguist".to_string()],
        characteristics: Characteristics {
            str: 45,
            con: 50,
            siz: 60,
            dex: 50,
            app: 40,
            edu: 65,
            int: 55,
            pow: 45,
        },
        luck: 50,
        skills: DEFAULT_SKILLS
            .iter()
            .map(|name| Skill::new(*name, skill_minimum(name).unwrap_or(0), SkillKind::Default))
            .collect(),
    };
    record.set_skill("Spot Hidden", 60, SkillKind::Default);
    record.set_skill("Handgun", 50, SkillKind::Specialization);
    record.set_skill("Science (Biology)", 40, SkillKind::Specialization);
    record.set_skill("Brawl", 45, SkillKind::Specialization);
    record.set_skill("Stamp Collecting", 30, SkillKind::Custom);
    record
}
