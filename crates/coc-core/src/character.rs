//! The imported character record.
//!
//! Known attributes are typed fields. Skills are an ordered list so the
//! sheet's own order is kept for lookups; display order is produced by an
//! explicit sort in [`CharacterRecord::default_skill_lines`] and
//! [`CharacterRecord::custom_skill_lines`].

use serde::{Deserialize, Serialize};

use crate::skills::{CTHULHU_MYTHOS, UMBRELLA_SKILLS, skill_minimum};

/// One of the eight characteristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Characteristic {
    /// Strength.
    Str,
    /// Constitution.
    Con,
    /// Size.
    Siz,
    /// Dexterity.
    Dex,
    /// Appearance.
    App,
    /// Education.
    Edu,
    /// Intelligence.
    Int,
    /// Power.
    Pow,
}

impl Characteristic {
    /// All characteristics in sheet order.
    pub const ALL: [Characteristic; 8] = [
        Self::Str,
        Self::Con,
        Self::Siz,
        Self::Dex,
        Self::App,
        Self::Edu,
        Self::Int,
        Self::Pow,
    ];

    /// Lower-case three-letter abbreviation ("str").
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Con => "con",
            Self::Siz => "siz",
            Self::Dex => "dex",
            Self::App => "app",
            Self::Edu => "edu",
            Self::Int => "int",
            Self::Pow => "pow",
        }
    }

    /// Lower-case full name ("strength").
    pub fn full_name(self) -> &'static str {
        match self {
            Self::Str => "strength",
            Self::Con => "constitution",
            Self::Siz => "size",
            Self::Dex => "dexterity",
            Self::App => "appearance",
            Self::Edu => "education",
            Self::Int => "intelligence",
            Self::Pow => "power",
        }
    }

    /// Upper-case label used in check output ("STR").
    pub fn label(self) -> &'static str {
        match self {
            Self::Str => "STR",
            Self::Con => "CON",
            Self::Siz => "SIZ",
            Self::Dex => "DEX",
            Self::App => "APP",
            Self::Edu => "EDU",
            Self::Int => "INT",
            Self::Pow => "POW",
        }
    }
}

impl std::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Characteristic scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristics {
    pub str: u32,
    pub con: u32,
    pub siz: u32,
    pub dex: u32,
    pub app: u32,
    pub edu: u32,
    pub int: u32,
    pub pow: u32,
}

impl Characteristics {
    /// Score for one characteristic.
    pub fn get(&self, which: Characteristic) -> u32 {
        match which {
            Characteristic::Str => self.str,
            Characteristic::Con => self.con,
            Characteristic::Siz => self.siz,
            Characteristic::Dex => self.dex,
            Characteristic::App => self.app,
            Characteristic::Edu => self.edu,
            Characteristic::Int => self.int,
            Characteristic::Pow => self.pow,
        }
    }

    /// Mutable score for one characteristic.
    pub fn get_mut(&mut self, which: Characteristic) -> &mut u32 {
        match which {
            Characteristic::Str => &mut self.str,
            Characteristic::Con => &mut self.con,
            Characteristic::Siz => &mut self.siz,
            Characteristic::Dex => &mut self.dex,
            Characteristic::App => &mut self.app,
            Characteristic::Edu => &mut self.edu,
            Characteristic::Int => &mut self.int,
            Characteristic::Pow => &mut self.pow,
        }
    }

    /// Sum of all eight scores, widened so arbitrary input cannot overflow.
    pub fn sum(&self) -> u64 {
        Characteristic::ALL
            .iter()
            .map(|c| u64::from(self.get(*c)))
            .sum()
    }
}

/// Where a skill entry came from on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillKind {
    /// Printed on the sheet's default list.
    Default,
    /// A specialization block entry (weapons, sciences, languages, ...).
    Specialization,
    /// A free-form custom entry.
    Custom,
}

/// A named skill with its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub value: u32,
    pub kind: SkillKind,
}

impl Skill {
    pub fn new(name: impl Into<String>, value: u32, kind: SkillKind) -> Self {
        Self {
            name: name.into(),
            value,
            kind,
        }
    }
}

/// One imported character sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub archetype: String,
    pub occupation_skill: String,
    #[serde(default)]
    pub psychic_power: Option<String>,
    pub talents: [String; 2],
    pub characteristics: Characteristics,
    pub luck: u32,
    /// Skills in sheet order.
    pub skills: Vec<Skill>,
}

impl CharacterRecord {
    /// Exact (case-sensitive) skill lookup.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    /// Value of the Cthulhu Mythos skill, 0 if the sheet has none.
    pub fn mythos(&self) -> u32 {
        self.skill(CTHULHU_MYTHOS).map(|s| s.value).unwrap_or(0)
    }

    /// Insert or replace a skill, keeping its original position if present.
    pub fn set_skill(&mut self, name: &str, value: u32, kind: SkillKind) {
        match self.skills.iter_mut().find(|s| s.name == name) {
            Some(skill) => {
                skill.value = value;
                skill.kind = kind;
            }
            None => self.skills.push(Skill::new(name, value, kind)),
        }
    }

    /// Default skills plus umbrella categories at their minimum, sorted by name.
    pub fn default_skill_lines(&self) -> Vec<(String, u32)> {
        let mut lines: Vec<(String, u32)> = self
            .skills
            .iter()
            .filter(|s| s.kind == SkillKind::Default)
            .map(|s| (s.name.clone(), s.value))
            .collect();
        for umbrella in UMBRELLA_SKILLS {
            lines.push((umbrella.to_string(), skill_minimum(umbrella).unwrap_or(0)));
        }
        lines.sort_by(|a, b| a.0.cmp(&b.0));
        lines
    }

    /// Specialization and custom skills, sorted by name.
    pub fn custom_skill_lines(&self) -> Vec<(String, u32)> {
        let mut lines: Vec<(String, u32)> = self
            .skills
            .iter()
            .filter(|s| s.kind != SkillKind::Default)
            .map(|s| (s.name.clone(), s.value))
            .collect();
        lines.sort_by(|a, b| a.0.cmp(&b.0));
        lines
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::skills::DEFAULT_SKILLS;

    /// A valid 460-point investigator used across crate tests.
    pub fn investigator() -> CharacterRecord {
        let mut skills: Vec<Skill> = DEFAULT_SKILLS
            .iter()
            .map(|name| {
                Skill::new(
                    *name,
                    skill_minimum(name).unwrap_or(0),
                    SkillKind::Default,
                )
            })
            .collect();
        if let Some(spot) = skills.iter_mut().find(|s| s.name == "Spot Hidden") {
            spot.value = 60;
        }
        skills.push(Skill::new("Handgun", 50, SkillKind::Specialization));
        skills.push(Skill::new("Science (Biology)", 40, SkillKind::Specialization));
        skills.push(Skill::new("Brawl", 45, SkillKind::Specialization));
        skills.push(Skill::new("Stamp Collecting", 30, SkillKind::Custom));

        CharacterRecord {
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
            skills,
        }
    }
}
