//! Parsing of free-text check requests.
//!
//! A request is a bare query followed by any number of flags:
//!
//! ```text
//! spot hidden -bonus 1 -penalty 1d2 -phrase "look closer" -rr 3
//! ```
//!
//! A flag is recognised only as a whole space-delimited token. Its
//! argument runs until the next flag or the end of the input.

use serde::{Deserialize, Serialize};

/// A flag recognised in check requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flag {
    /// Extra bonus dice.
    Bonus,
    /// Extra penalty dice.
    Penalty,
    /// Flavour text shown with the result.
    Phrase,
    /// Number of times to repeat the roll.
    Rr,
}

impl Flag {
    pub const ALL: [Flag; 4] = [Self::Bonus, Self::Penalty, Self::Phrase, Self::Rr];

    /// The flag's name as typed after the hyphen.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bonus => "bonus",
            Self::Penalty => "penalty",
            Self::Phrase => "phrase",
            Self::Rr => "rr",
        }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "-{}", self.name())
    }
}

/// Quote marks that may wrap a flag argument.
const QUOTES: [char; 3] = ['"', '\u{201C}', '\u{201D}'];

/// A check request split into its bare query and flag arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub query: String,
    pub bonus: Vec<String>,
    pub penalty: Vec<String>,
    pub phrase: Vec<String>,
    pub rr: Vec<String>,
}

impl ParsedQuery {
    /// Arguments given for one flag, in order.
    pub fn args(&self, flag: Flag) -> &[String] {
        match flag {
            Flag::Bonus => &self.bonus,
            Flag::Penalty => &self.penalty,
            Flag::Phrase => &self.phrase,
            Flag::Rr => &self.rr,
        }
    }

    fn args_mut(&mut self, flag: Flag) -> &mut Vec<String> {
        match flag {
            Flag::Bonus => &mut self.bonus,
            Flag::Penalty => &mut self.penalty,
            Flag::Phrase => &mut self.phrase,
            Flag::Rr => &mut self.rr,
        }
    }
}

/// A flag occurrence inside the padded input.
struct Occurrence {
    flag: Flag,
    /// Byte offset of the token's leading space.
    start: usize,
    /// Byte offset just past the flag name, before its trailing space.
    name_end: usize,
}

/// Split a check request into its bare query and flag arguments.
pub fn parse_query(text: &str) -> ParsedQuery {
    // Padding lets flags at either end match the " -flag " shape.
    let padded = format!(" {text} ");
    let mut occurrences = Vec::new();
    for flag in Flag::ALL {
        let token = format!(" -{} ", flag.name());
        for start in find_overlapping(&padded, &token) {
            occurrences.push(Occurrence {
                flag,
                start,
                name_end: start + token.len() - 1,
            });
        }
    }
    occurrences.sort_by_key(|o| o.start);

    let query_end = occurrences.first().map_or(padded.len(), |o| o.start);
    let mut parsed = ParsedQuery {
        query: padded[..query_end].trim().to_string(),
        ..ParsedQuery::default()
    };

    for (i, occ) in occurrences.iter().enumerate() {
        let end = occurrences.get(i + 1).map_or(padded.len(), |next| next.start);
        let arg = padded.get(occ.name_end..end).unwrap_or("");
        parsed.args_mut(occ.flag).push(strip_quotes(arg.trim()).to_string());
    }

    parsed
}

/// Every start offset of `needle` in `haystack`, overlaps included.
///
/// Consecutive flags share the space between them, so a plain
/// non-overlapping search would miss the second one.
fn find_overlapping(haystack: &str, needle: &str) -> Vec<usize> {
    let mut found = Vec::new();
    let mut from = 0;
    while let Some(idx) = haystack[from..].find(needle) {
        found.push(from + idx);
        from += idx + 1;
    }
    found
}

/// Remove one pair of wrapping quote marks, if present.
fn strip_quotes(arg: &str) -> &str {
    let mut chars = arg.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if QUOTES.contains(&first) && QUOTES.contains(&last) => {
            chars.as_str()
        }
        _ => arg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bonus_and_quoted_phrase() {
        let parsed = parse_query(r#"brawl -bonus 1d4 -phrase "for the glory!""#);
        assert_eq!(parsed.query, "brawl");
        assert_eq!(parsed.bonus, strings(&["1d4"]));
        assert_eq!(parsed.phrase, strings(&["for the glory!"]));
        assert!(parsed.penalty.is_empty());
        assert!(parsed.rr.is_empty());
    }

    #[test]
    fn no_flags_is_all_query() {
        let parsed = parse_query("  spot hidden ");
        assert_eq!(parsed.query, "spot hidden");
        assert_eq!(parsed, ParsedQuery {
            query: "spot hidden".to_string(),
            ..ParsedQuery::default()
        });
    }

    #[test]
    fn only_flags_leaves_empty_query() {
        let parsed = parse_query("-bonus 2 -rr 3");
        assert_eq!(parsed.query, "");
        assert_eq!(parsed.bonus, strings(&["2"]));
        assert_eq!(parsed.rr, strings(&["3"]));
    }

    #[test]
    fn repeated_flags_accumulate_in_order() {
        let parsed = parse_query("dodge -penalty 1 -bonus 1 -penalty 1d2");
        assert_eq!(parsed.penalty, strings(&["1", "1d2"]));
        assert_eq!(parsed.bonus, strings(&["1"]));
    }

    #[test]
    fn flag_without_argument() {
        let parsed = parse_query("listen -bonus");
        assert_eq!(parsed.query, "listen");
        assert_eq!(parsed.bonus, strings(&[""]));
    }

    #[test]
    fn adjacent_flags_do_not_leak() {
        let parsed = parse_query("listen -bonus -penalty 2");
        assert_eq!(parsed.bonus, strings(&[""]));
        assert_eq!(parsed.penalty, strings(&["2"]));

        let parsed = parse_query("listen -bonus -bonus");
        assert_eq!(parsed.bonus, strings(&["", ""]));
    }

    #[test]
    fn flags_are_case_sensitive_whole_tokens() {
        let parsed = parse_query("listen -Bonus 1 -bonusx 2");
        assert_eq!(parsed.query, "listen -Bonus 1 -bonusx 2");
        assert!(parsed.bonus.is_empty());
    }

    #[test]
    fn curly_quotes_are_stripped() {
        let parsed = parse_query("charm -phrase \u{201C}good evening\u{201D}");
        assert_eq!(parsed.phrase, strings(&["good evening"]));
    }

    #[test]
    fn unbalanced_or_lone_quotes_are_kept() {
        let parsed = parse_query("charm -phrase \"hello -phrase \"");
        assert_eq!(parsed.phrase, strings(&["\"hello", "\""]));
    }

    #[test]
    fn numeric_query() {
        let parsed = parse_query("45 -penalty 1");
        assert_eq!(parsed.query, "45");
        assert_eq!(parsed.args(Flag::Penalty), &strings(&["1"])[..]);
    }

    #[test]
    fn flag_display() {
        assert_eq!(Flag::Rr.to_string(), "-rr");
    }
}
