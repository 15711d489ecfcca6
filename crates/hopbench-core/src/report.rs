//! Session audit report with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{OptionLetter, Participant, Question};
use crate::scoring::Scores;

/// The audit view of a finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Session identifier.
    pub id: Uuid,
    /// When the session finished.
    pub created_at: DateTime<Utc>,
    /// Who took the quiz.
    pub participant: Participant,
    /// The difficulty tier played.
    pub difficulty: u8,
    /// Display name of the model baseline.
    pub model_label: String,
    /// Final scores.
    pub scores: Scores,
    /// Positive when the model did better.
    pub percent_difference: f64,
    /// One entry per sampled question, in play order.
    pub traces: Vec<QuestionTrace>,
}

/// How one question went for both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionTrace {
    pub question_id: i64,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: OptionLetter,
    /// The participant's answer (absent only if the session never got there).
    #[serde(default)]
    pub user_answer: Option<OptionLetter>,
    pub user_correct: bool,
    pub model_correct: bool,
    /// The model's chain-of-thought trace.
    #[serde(default)]
    pub model_explanation: String,
}

impl QuestionTrace {
    pub fn new(question: &Question, user_answer: Option<OptionLetter>) -> Self {
        Self {
            question_id: question.id,
            question_text: question.question_text.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer,
            user_answer,
            user_correct: user_answer == Some(question.correct_answer),
            model_correct: question.model_correct,
            model_explanation: question.model_explanation.clone(),
        }
    }
}

impl SessionReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
