use coc_core::{Characteristic, Resource, StoredCharacter};
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use super::Session;

/// Skill name/value pairs per table row.
const SKILL_COLUMNS: usize = 3;

pub fn run(session: &Session) -> Result<(), String> {
    let roster = session.load()?;
    let stored = roster.active().map_err(|e| e.to_string())?;
    let record = &stored.record;

    println!("  {} [{}]", record.name.bold(), record.archetype.dimmed());
    println!();
    println!("  occupation skill: {}", record.occupation_skill);
    println!("  talents:          {}", record.talents.join(", "));
    if let Some(power) = &record.psychic_power {
        println!("  psychic power:    {power}");
    }
    println!();

    let characteristics: Vec<String> = Characteristic::ALL
        .iter()
        .map(|ch| format!("{} {}", ch.label(), record.characteristics.get(*ch)))
        .collect();
    println!("  {}", characteristics.join("  "));

    let derived = record
        .characteristics
        .derived()
        .map_err(|e| e.to_string())?;
    println!(
        "  Damage Bonus {}  Build {}  Move {}",
        derived.damage_bonus, derived.build, derived.move_rate
    );
    println!();

    print_pools(stored);
    println!();

    println!("{}", skill_table(&record.default_skill_lines()));
    let custom = record.custom_skill_lines();
    if !custom.is_empty() {
        println!();
        println!("{}", skill_table(&custom));
    }
    Ok(())
}

fn print_pools(stored: &StoredCharacter) {
    let mythos = stored.record.mythos();
    let pools: Vec<String> = Resource::ALL
        .iter()
        .map(|resource| {
            format!(
                "{resource} {}/{}",
                stored.balances.get(*resource),
                stored.balances.maximum(*resource, mythos)
            )
        })
        .collect();
    println!("  {}", pools.join("  "));
}

fn skill_table(lines: &[(String, u32)]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        std::iter::repeat_n(["Skill", "%"], SKILL_COLUMNS)
            .flatten()
            .collect::<Vec<_>>(),
    );
    for chunk in lines.chunks(SKILL_COLUMNS) {
        let mut row: Vec<String> = Vec::with_capacity(SKILL_COLUMNS * 2);
        for (name, value) in chunk {
            row.push(name.clone());
            row.push(value.to_string());
        }
        row.resize(SKILL_COLUMNS * 2, String::new());
        table.add_row(row);
    }
    table
}
