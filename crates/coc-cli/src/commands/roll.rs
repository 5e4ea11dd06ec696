use super::Session;

pub fn run(session: &mut Session, expr: &str) -> Result<(), String> {
    let total = session.engine.roll(expr).map_err(|e| e.to_string())?;
    println!("  {}: {total}", expr.trim());
    Ok(())
}
