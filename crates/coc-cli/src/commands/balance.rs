use coc_core::Resource;
use colored::Colorize;

use super::Session;

pub fn run(session: &mut Session, resource: &str, request: &str) -> Result<(), String> {
    let resource = Resource::parse(resource).ok_or_else(|| {
        format!("unknown resource '{resource}'; use luck, sanity, health, or magic")
    })?;

    let mut roster = session.load()?;
    let stored = roster.active_mut().map_err(|e| e.to_string())?;
    let mythos = stored.record.mythos();
    let before = stored.balances.get(resource);
    let change = session
        .engine
        .adjust(&mut stored.balances, resource, mythos, request)
        .map_err(|e| e.to_string())?;
    let maximum = stored.balances.maximum(resource, mythos);
    let name = stored.record.name.clone();

    // Constant amounts need no breakdown.
    let rolled_dice = change
        .rolled
        .as_ref()
        .filter(|r| r.terms.iter().any(|t| !t.rolls.is_empty()));
    if let Some(rolled) = rolled_dice {
        println!("  rolled {rolled}");
    }
    if change.delta == 0 {
        println!("  {}'s {resource}: {}/{maximum}", name.bold(), change.value);
        return Ok(());
    }

    session.save(&roster)?;
    println!(
        "  {}'s {resource}: {before} -> {}/{maximum} ({:+})",
        name.bold(),
        change.value,
        change.delta
    );
    Ok(())
}
