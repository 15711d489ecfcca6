//! The `hopbench validate` command.

use std::path::PathBuf;

use anyhow::Result;

use hopbench_core::pool::{load_records, QuestionPool};
use hopbench_core::validate::validate_records;

pub fn execute(questions: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let (_, path) = super::resolve_questions(questions, config.as_deref())?;
    let records = load_records(&path)?;
    let pool = QuestionPool::from_records(&records);

    println!("Question file: {} ({} records)", path.display(), records.len());
    for (tier, count) in pool.difficulty_counts() {
        println!("  difficulty {tier}: {count} question(s)");
    }

    let warnings = validate_records(&records);
    for w in &warnings {
        let prefix = w
            .record_id
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| format!("  [#{}]", w.index));
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All questions valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
