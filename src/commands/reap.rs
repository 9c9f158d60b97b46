//! `locgate reap`: find gateway processes by name and terminate them.

use crate::error::Result;
use crate::reaper::{find_targets, terminate_targets};
use colored::Colorize;

/// Terminate every process matching `pattern`. Returns `true` when all
/// matched processes went down (or none matched at all).
pub fn handle_reap(pattern: &str, graceful: bool) -> Result<bool> {
    let targets = find_targets(pattern, std::process::id());

    if targets.is_empty() {
        println!("no matching process found for '{}'", pattern);
        return Ok(true);
    }

    println!("found {} matching process(es) for '{}'", targets.len(), pattern);

    let outcomes = terminate_targets(&targets, graceful);
    let mut all_ok = true;

    for outcome in &outcomes {
        if outcome.terminated() {
            println!(
                "{} pid {} ({})",
                "terminated".green(),
                outcome.pid,
                outcome.name
            );
        } else {
            all_ok = false;
            println!(
                "{} pid {} ({}): {}",
                "failed".red().bold(),
                outcome.pid,
                outcome.name,
                outcome.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(all_ok)
}
