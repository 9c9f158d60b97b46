//! `locgate smoke`: post the hardcoded request sequence and report verdicts.

use crate::error::Result;
use crate::smoke::{builtin_cases, SmokeClient};
use colored::Colorize;
use std::time::Duration;

/// Run the built-in smoke sequence. Returns `true` when every case passed.
pub async fn handle_smoke(endpoint: &str, timeout: Duration) -> Result<bool> {
    let client = SmokeClient::new(endpoint, timeout)?;
    let cases = builtin_cases();

    println!("posting {} smoke cases to {}", cases.len(), endpoint);

    let reports = client.run_all(&cases).await;
    let mut passed = 0usize;

    for report in &reports {
        if report.passed {
            passed += 1;
            println!("{} {} ({})", "PASS".green().bold(), report.name, report.detail);
        } else {
            println!("{} {}: {}", "FAIL".red().bold(), report.name, report.detail);
        }
    }

    println!("{}/{} cases passed", passed, reports.len());
    Ok(passed == reports.len())
}
