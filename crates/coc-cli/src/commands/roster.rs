use coc_core::sheet_url;
use colored::Colorize;

use super::Session;

pub fn list(session: &Session, links: bool) -> Result<(), String> {
    let roster = session.load()?;
    if roster.is_empty() {
        println!("  No characters imported.");
        return Ok(());
    }

    for line in roster.listing() {
        let marker = if line.active { "*" } else { " " };
        let name = if line.active {
            line.name.bold().to_string()
        } else {
            line.name
        };
        if links {
            println!("  {marker} {name}  {}", sheet_url(&line.sheet_id).dimmed());
        } else {
            println!("  {marker} {name}");
        }
    }
    Ok(())
}

/// Print what is stored for the user: sheet links, or the full roster as JSON.
pub fn export(session: &Session, json: bool) -> Result<(), String> {
    let roster = session.load()?;
    if json {
        let text = serde_json::to_string_pretty(&roster).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }
    if roster.is_empty() {
        println!("  No data is stored for {}.", session.user());
        return Ok(());
    }

    println!("  Stored characters for {}:", session.user());
    for line in roster.listing() {
        println!("  {}  {}", line.name, sheet_url(&line.sheet_id));
    }
    Ok(())
}

pub fn forget(session: &mut Session) -> Result<(), String> {
    session.clear()?;
    println!("  Forgot every character stored for {}.", session.user());
    Ok(())
}

pub fn switch(session: &mut Session, query: &str) -> Result<(), String> {
    let mut roster = session.load()?;
    let name = roster
        .set_active(query)
        .map_err(|e| e.to_string())?
        .to_string();
    session.save(&roster)?;
    println!("  Switched to {}.", name.bold());
    Ok(())
}

pub fn remove(session: &mut Session, query: &str) -> Result<(), String> {
    let mut roster = session.load()?;
    let removed = roster.remove(query).map_err(|e| e.to_string())?;
    session.save(&roster)?;
    println!("  Removed {}.", removed.record.name.bold());
    if roster.active.is_none() && !roster.is_empty() {
        println!("  No character is active; use `coc switch` to pick one.");
    }
    Ok(())
}
