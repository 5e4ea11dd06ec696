//! Decoder for the published character-sheet spreadsheet.
//!
//! The template is a fixed grid: every field lives at a known
//! `(row, column)` cell of the CSV export. Decoding reports every
//! missing or malformed cell instead of stopping at the first one.

use crate::character::{Characteristic, Characteristics, CharacterRecord, Skill, SkillKind};
use crate::skills::DEFAULT_SKILLS;
use crate::validate::ValidationErrors;

type Cell = (usize, usize);

const NAME: Cell = (2, 1);
const LUCK: Cell = (15, 2);
const ARCHETYPE: Cell = (2, 5);
const PSYCHIC_POWER: Cell = (10, 5);
const OCCUPATION_SKILL: Cell = (15, 5);
const TALENTS: [Cell; 2] = [(7, 5), (8, 5)];

const CHARACTERISTIC_ROW_START: usize = 7;
const CHARACTERISTIC_COL: usize = 2;

const SKILL_ROW_START: usize = 2;
const SKILL_COL: usize = 8;

const BLOCK_LENGTH: usize = 5;
const SPECIAL_ROW_STARTS: [usize; 4] = [3, 13, 23, 33];
const SPECIAL_COL_STARTS: [usize; 2] = [10, 13];

const CUSTOM_ROW_START: usize = 3;
const CUSTOM_COL: usize = 16;

/// Read-only view over a CSV grid.
struct Grid<'a> {
    rows: &'a [Vec<String>],
}

impl Grid<'_> {
    /// Trimmed cell contents, or `None` past the edge of the grid.
    fn get(&self, (row, col): Cell) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.trim())
    }

    /// Trimmed cell contents, empty when missing.
    fn text(&self, cell: Cell) -> &str {
        self.get(cell).unwrap_or("")
    }

    fn required(&self, cell: Cell, field: &str, errors: &mut ValidationErrors) -> String {
        match self.get(cell) {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => {
                errors.push(field, format!("cell {} is empty", cell_name(cell)));
                String::new()
            }
        }
    }

    fn number(&self, cell: Cell, field: &str, errors: &mut ValidationErrors) -> u32 {
        let raw = self.text(cell);
        match parse_whole_number(raw) {
            Some(n) => n,
            None => {
                errors.push(
                    field,
                    format!("'{raw}' in cell {} is not a whole number", cell_name(cell)),
                );
                0
            }
        }
    }
}

/// Decode a sheet grid into a record.
///
/// Only the layout is checked here; point-buy and range rules are
/// applied by [`crate::validate::validate_record`].
pub fn decode_grid(rows: &[Vec<String>]) -> Result<CharacterRecord, ValidationErrors> {
    let grid = Grid { rows };
    let mut errors = ValidationErrors::default();

    let name = grid.required(NAME, "name", &mut errors);
    let archetype = grid.required(ARCHETYPE, "archetype", &mut errors);
    let occupation_skill = grid.required(OCCUPATION_SKILL, "occupation skill", &mut errors);
    let psychic_power = Some(grid.text(PSYCHIC_POWER))
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let luck = grid.number(LUCK, "luck", &mut errors);

    // Talent slots may be empty here; validation reports them.
    let talents = TALENTS.map(|cell| grid.text(cell).to_string());

    let mut characteristics = Characteristics::default();
    for (i, ch) in Characteristic::ALL.iter().enumerate() {
        let cell = (CHARACTERISTIC_ROW_START + i, CHARACTERISTIC_COL);
        *characteristics.get_mut(*ch) = grid.number(cell, ch.label(), &mut errors);
    }

    let mut skills = Vec::new();
    for (i, skill) in DEFAULT_SKILLS.iter().enumerate() {
        let value = grid.number((SKILL_ROW_START + i, SKILL_COL), skill, &mut errors);
        skills.push(Skill::new(*skill, value, SkillKind::Default));
    }

    for col in SPECIAL_COL_STARTS {
        for row_start in SPECIAL_ROW_STARTS {
            for row in row_start..row_start + BLOCK_LENGTH {
                read_named_skill(&grid, row, col, SkillKind::Specialization, &mut skills, &mut errors);
            }
        }
    }

    for row in CUSTOM_ROW_START..CUSTOM_ROW_START + BLOCK_LENGTH {
        read_named_skill(&grid, row, CUSTOM_COL, SkillKind::Custom, &mut skills, &mut errors);
    }

    errors.into_result()?;
    Ok(CharacterRecord {
        name,
        archetype,
        occupation_skill,
        psychic_power,
        talents,
        characteristics,
        luck,
        skills,
    })
}

/// Read a `name | points` pair; rows with either cell empty are skipped.
fn read_named_skill(
    grid: &Grid<'_>,
    row: usize,
    col: usize,
    kind: SkillKind,
    skills: &mut Vec<Skill>,
    errors: &mut ValidationErrors,
) {
    let name = grid.text((row, col));
    let points = grid.text((row, col + 1));
    if name.is_empty() || points.is_empty() {
        return;
    }
    let value = grid.number((row, col + 1), name, errors);
    match skills.iter_mut().find(|s| s.name == name) {
        Some(existing) => {
            existing.value = value;
            existing.kind = kind;
        }
        None => skills.push(Skill::new(name, value, kind)),
    }
}

fn parse_whole_number(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Spreadsheet-style cell name, e.g. `C8` for `(7, 2)`.
fn cell_name((row, col): Cell) -> String {
    let mut letters = Vec::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    let column: String = letters.into_iter().rev().collect();
    format!("{column}{}", row + 1)
}

/// Split CSV text into rows of fields.
///
/// Handles quoted fields, doubled quotes inside quotes, and CRLF line
/// endings, which is all the published-sheet export produces.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    rows
}
