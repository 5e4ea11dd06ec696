//! Fixed skill tables for the Pulp Cthulhu sheet template.
//!
//! Skills come in three flavours: the default list printed on the sheet,
//! umbrella categories that need a player-chosen specialization (Science,
//! Pilot, ...), and free-form custom entries. Only the first two have a
//! known minimum.

/// Sum of the eight characteristics plus luck under the point-buy rules.
pub const POINT_BUY_TOTAL: u32 = 460;

/// Highest value any skill may hold.
pub const SKILL_MAXIMUM: u32 = 99;

/// Skills printed on the sheet, in sheet order.
pub const DEFAULT_SKILLS: &[&str] = &[
    "Accounting",
    "Animal Handling",
    "Anthropology",
    "Appraise",
    "Archaeology",
    "Artillery",
    "Charm",
    "Climb",
    "Credit Rating",
    "Cthulhu Mythos",
    "Demolitions",
    "Disguise",
    "Diving",
    "Dodge",
    "Drive Auto",
    "Electrical Repair",
    "Fast Talk",
    "First Aid",
    "History",
    "Hypnosis",
    "Intimidate",
    "Jump",
    "Language (Own)",
    "Law",
    "Library Use",
    "Listen",
    "Locksmith",
    "Mechanical Repair",
    "Medicine",
    "Natural World",
    "Navigate",
    "Occult",
    "Operate Heavy Machinery",
    "Persuade",
    "Psychoanalysis",
    "Psychology",
    "Read Lips",
    "Ride",
    "Sleight of Hand",
    "Spot Hidden",
    "Stealth",
    "Swim",
    "Throw",
    "Track",
];

/// Skill categories that require a specialization.
pub const UMBRELLA_SKILLS: &[&str] = &[
    "Art and Craft",
    "Language (Other)",
    "Lore",
    "Pilot",
    "Science",
    "Survival",
];

/// Base value of every known skill, including combat skills and umbrellas.
pub const SKILL_MINIMUMS: &[(&str, u32)] = &[
    ("Accounting", 5),
    ("Animal Handling", 5),
    ("Anthropology", 1),
    ("Appraise", 5),
    ("Archaeology", 1),
    ("Artillery", 1),
    ("Art and Craft", 5),
    ("Axe", 15),
    ("Bow", 15),
    ("Brawl", 25),
    ("Chainsaw", 10),
    ("Charm", 15),
    ("Climb", 20),
    ("Credit Rating", 0),
    ("Cthulhu Mythos", 0),
    ("Demolitions", 1),
    ("Disguise", 5),
    ("Diving", 1),
    ("Dodge", 7),
    ("Drive Auto", 20),
    ("Electrical Repair", 10),
    ("Fast Talk", 5),
    ("First Aid", 30),
    ("Flail", 10),
    ("Flamethrower", 10),
    ("Garrote", 15),
    ("Handgun", 20),
    ("Heavy Weapons", 10),
    ("History", 5),
    ("Hypnosis", 1),
    ("Intimidate", 15),
    ("Jump", 20),
    ("Language (Other)", 1),
    ("Language (Own)", 7),
    ("Law", 5),
    ("Library Use", 20),
    ("Listen", 20),
    ("Locksmith", 1),
    ("Lore", 1),
    ("Machine Gun", 10),
    ("Mechanical Repair", 10),
    ("Medicine", 1),
    ("Natural World", 10),
    ("Navigate", 10),
    ("Occult", 5),
    ("Operate Heavy Machinery", 1),
    ("Persuade", 10),
    ("Pilot", 1),
    ("Psychoanalysis", 1),
    ("Psychology", 10),
    ("Read Lips", 1),
    ("Ride", 5),
    ("Rifle/Shotgun", 25),
    ("Science", 1),
    ("Sleight of Hand", 10),
    ("Spear", 20),
    ("Spot Hidden", 25),
    ("Stealth", 20),
    ("Submachine Gun", 15),
    ("Survival", 10),
    ("Swim", 20),
    ("Sword", 20),
    ("Throw", 20),
    ("Track", 10),
    ("Whip", 5),
];

/// Name of the skill that caps sanity.
pub const CTHULHU_MYTHOS: &str = "Cthulhu Mythos";

/// The table minimum for an exactly-named skill.
pub fn skill_minimum(name: &str) -> Option<u32> {
    SKILL_MINIMUMS
        .iter()
        .find(|(skill, _)| *skill == name)
        .map(|(_, min)| *min)
}

/// The umbrella category a specialization belongs to, if any.
///
/// "Science (Biology)" and "Language (French)" map to "Science" and
/// "Language (Other)" by comparing the text before the parenthesis.
pub fn umbrella_for(name: &str) -> Option<&'static str> {
    let base = base_name(name);
    UMBRELLA_SKILLS
        .iter()
        .copied()
        .find(|umbrella| base_name(umbrella).eq_ignore_ascii_case(base))
}

/// Lowest legal value for a skill on the sheet.
///
/// Exact table entries win; specializations fall back to their umbrella;
/// free-form custom skills have no floor.
pub fn category_minimum(name: &str) -> u32 {
    skill_minimum(name)
        .or_else(|| umbrella_for(name).and_then(skill_minimum))
        .unwrap_or(0)
}

fn base_name(name: &str) -> &str {
    name.split(" (").next().unwrap_or(name).trim()
}
