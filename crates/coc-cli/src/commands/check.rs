use coc_mechanics::{CheckReport, LuckHints, RollOutcome, SuccessTier};
use colored::{ColoredString, Colorize};

use super::Session;

pub fn run(session: &mut Session, text: &str) -> Result<(), String> {
    let roster = session.load()?;
    // A blind DC check works without any character.
    let character = roster
        .active()
        .ok()
        .map(|stored| (&stored.record, &stored.balances));

    let report = session
        .engine
        .check(text, character)
        .map_err(|e| e.to_string())?;

    for ignored in &report.ignored {
        eprintln!("warning: ignored {ignored}: could not interpret as integer or dice roll");
    }

    print_header(&report);
    let numbered = report.repetitions() > 1;
    for (i, outcome) in report.rolls.iter().enumerate() {
        let prefix = if numbered {
            format!("{:>2}. ", i + 1)
        } else {
            String::new()
        };
        println!("  {prefix}{}", describe(outcome));
    }
    Ok(())
}

fn print_header(report: &CheckReport) {
    let name = match &report.label {
        Some(label) => format!("{label} ({})", report.difficulty),
        None => format!("DC {}", report.difficulty),
    };
    println!("  {}", name.bold());
    if let Some(phrase) = &report.phrase {
        println!("  \"{}\"", phrase.italic());
    }
    if report.talent_bonus > 0 {
        println!("  {}", "talent: +1 bonus die".dimmed());
    }
}

fn describe(outcome: &RollOutcome) -> String {
    let roll = &outcome.roll;
    let tens: Vec<String> = roll
        .tens_dice
        .iter()
        .map(|d| ((d - 1) * 10).to_string())
        .collect();
    let mut line = match outcome.net {
        0 => String::new(),
        n if n > 0 => format!("{n} bonus "),
        n => format!("{} penalty ", n.unsigned_abs()),
    };
    line.push_str(&format!(
        "[{}] + {} = {}: {}",
        tens.join(", "),
        roll.ones,
        roll.total,
        tier_text(outcome.tier)
    ));
    if let Some(hints) = hint_text(&outcome.hints) {
        line.push_str(&format!(" ({hints})"));
    }
    line
}

fn tier_text(tier: SuccessTier) -> ColoredString {
    let text = tier.to_string();
    match tier {
        SuccessTier::Critical | SuccessTier::Extreme => text.bright_green().bold(),
        SuccessTier::Hard | SuccessTier::Regular => text.green(),
        SuccessTier::Failure => text.red(),
        SuccessTier::ConditionalFumble => text.yellow(),
        SuccessTier::Fumble => text.bright_red().bold(),
    }
}

fn hint_text(hints: &LuckHints) -> Option<String> {
    let parts: Vec<String> = [
        ("regular", hints.to_regular),
        ("hard", hints.to_hard),
        ("extreme", hints.to_extreme),
    ]
    .into_iter()
    .filter_map(|(tier, cost)| cost.map(|cost| format!("{cost} luck for {tier}")))
    .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
