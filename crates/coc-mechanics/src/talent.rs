//! Talents that grant a free bonus die on particular checks.

/// What a talent's trigger matches against a check label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The label equals this name, ignoring case.
    Exact(&'static str),
    /// The label contains this text, ignoring case.
    Contains(&'static str),
}

impl Trigger {
    pub fn matches(self, label: &str) -> bool {
        match self {
            Self::Exact(name) => label.eq_ignore_ascii_case(name),
            Self::Contains(part) => label.to_lowercase().contains(&part.to_lowercase()),
        }
    }
}

/// Talent name to the check it improves.
pub const TALENT_TRIGGERS: &[(&str, Trigger)] = &[
    ("Keen Vision", Trigger::Exact("Spot Hidden")),
    ("Keen Hearing", Trigger::Exact("Listen")),
    ("Smooth Talker", Trigger::Exact("Charm")),
    ("Scary", Trigger::Exact("Intimidate")),
    ("Shadow", Trigger::Exact("Stealth")),
    ("Linguist", Trigger::Contains("Language")),
    ("Sharp Witted", Trigger::Exact("INT")),
    ("Strong Willed", Trigger::Exact("POW")),
    ("Endurance", Trigger::Exact("CON")),
    ("Power Lifter", Trigger::Exact("STR")),
    ("Photographic Memory", Trigger::Exact("Know")),
    ("Arcane Insight", Trigger::Exact("Spellcasting")),
];

/// Bonus dice a character's talents grant on a check: 0 or 1.
///
/// Several matching talents still grant a single die.
pub fn resolve_talent_bonus(talents: &[String], label: &str) -> u32 {
    let granted = talents.iter().any(|talent| {
        TALENT_TRIGGERS.iter().any(|(name, trigger)| {
            talent.trim().eq_ignore_ascii_case(name) && trigger.matches(label)
        })
    });
    u32::from(granted)
}
