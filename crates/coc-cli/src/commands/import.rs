use std::path::Path;

use coc_core::{CharacterRecord, StoredCharacter, decode_grid, parse_csv, sheet_id_from_url};
use colored::Colorize;

use super::Session;

pub fn run(session: &mut Session, file: &Path, url: Option<&str>) -> Result<(), String> {
    let record = read_record(file)?;
    let sheet_id = sheet_id(file, url)?;

    let mut roster = session.load()?;
    let stored = roster
        .import(&sheet_id, record)
        .map_err(|e| e.to_string())?
        .clone();
    session.save(&roster)?;

    println!("  Imported {}.", stored.record.name.bold());
    print_pools(&stored);
    Ok(())
}

pub fn update(session: &mut Session, file: &Path, url: Option<&str>) -> Result<(), String> {
    let record = read_record(file)?;
    let sheet_id = sheet_id(file, url)?;

    let mut roster = session.load()?;
    let stored = roster
        .update(&sheet_id, record)
        .map_err(|e| e.to_string())?
        .clone();
    session.save(&roster)?;

    println!("  Updated {}.", stored.record.name.bold());
    print_pools(&stored);
    Ok(())
}

/// Read a sheet CSV export, or a JSON record for anything else.
fn read_record(file: &Path) -> Result<CharacterRecord, String> {
    let text = std::fs::read_to_string(file)
        .map_err(|e| format!("failed to read {}: {e}", file.display()))?;

    let is_csv = file
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        decode_grid(&parse_csv(&text)).map_err(|e| format!("invalid character sheet: {e}"))
    } else {
        serde_json::from_str(&text)
            .map_err(|e| format!("failed to parse {}: {e}", file.display()))
    }
}

/// The sheet link identifies a character; without one the file name does.
fn sheet_id(file: &Path, url: Option<&str>) -> Result<String, String> {
    match url {
        Some(url) => sheet_id_from_url(url).map_err(|e| e.to_string()),
        None => file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| format!("cannot name a character after {}", file.display())),
    }
}

fn print_pools(stored: &StoredCharacter) {
    let b = &stored.balances;
    println!(
        "  Luck {}  Sanity {}  HP {}/{}  MP {}/{}",
        b.luck, b.sanity, b.health, b.health_maximum, b.magic, b.magic_maximum
    );
}
