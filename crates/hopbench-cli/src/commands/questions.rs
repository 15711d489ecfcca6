//! The `hopbench questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use hopbench_core::model::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use hopbench_core::pool::questions_by_difficulty;

const PREVIEW_CHARS: usize = 60;

pub fn execute(difficulty: u8, questions: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(
        (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty),
        "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}"
    );
    let (_, path) = super::resolve_questions(questions, config.as_deref())?;
    let questions = questions_by_difficulty(&path, difficulty)?;

    if questions.is_empty() {
        println!("No questions at difficulty {difficulty} in {}.", path.display());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Question", "Options", "Answer", "Model"]);
    for q in &questions {
        table.add_row(vec![
            Cell::new(q.id),
            Cell::new(preview(&q.question_text)),
            Cell::new(q.options.len()),
            Cell::new(q.correct_answer),
            Cell::new(if q.model_correct { "correct" } else { "incorrect" }),
        ]);
    }

    println!("{table}");
    println!("{} question(s) at difficulty {difficulty}", questions.len());
    Ok(())
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        flat
    } else {
        let cut: String = flat.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{cut}...")
    }
}
