//! The `hopbench report` command.

use std::path::PathBuf;

use anyhow::Result;

use hopbench_core::report::SessionReport;
use hopbench_report::html::write_html_report;

/// Render a saved session JSON as an HTML report.
pub fn execute(session: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let report = SessionReport::load_json(&session)?;
    let output = output.unwrap_or_else(|| session.with_extension("html"));

    println!(
        "Session {} ({}, difficulty {}): you {} / model {} ({:+.1}%)",
        report.id,
        report.participant.name,
        report.difficulty,
        report.scores.user,
        report.scores.model,
        report.percent_difference
    );

    write_html_report(&report, &output)?;
    println!("HTML report: {}", output.display());
    Ok(())
}
