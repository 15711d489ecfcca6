//! Human vs. model scoring.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{OptionLetter, Question, SAMPLE_SIZE};

/// Correct answers for both sides of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Questions the participant got right.
    pub user: u32,
    /// Questions the model got right.
    pub model: u32,
}

/// Who came out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    HumanAhead,
    ModelAhead,
    Tie,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::HumanAhead => write!(f, "human ahead"),
            Verdict::ModelAhead => write!(f, "model ahead"),
            Verdict::Tie => write!(f, "tie"),
        }
    }
}

impl Scores {
    /// See [`percent_difference`].
    pub fn percent_difference(&self) -> f64 {
        percent_difference(self.user, self.model)
    }

    pub fn verdict(&self) -> Verdict {
        match self.user.cmp(&self.model) {
            std::cmp::Ordering::Greater => Verdict::HumanAhead,
            std::cmp::Ordering::Less => Verdict::ModelAhead,
            std::cmp::Ordering::Equal => Verdict::Tie,
        }
    }
}

/// Score a set of questions against the participant's answers.
///
/// The participant earns a point for every question whose recorded letter
/// equals the correct answer; unanswered questions earn nothing. The model
/// earns a point for every question it got right.
pub fn score(questions: &[Question], answers: &HashMap<i64, OptionLetter>) -> Scores {
    let user = questions
        .iter()
        .filter(|q| answers.get(&q.id) == Some(&q.correct_answer))
        .count() as u32;

    let model = questions.iter().filter(|q| q.model_correct).count() as u32;

    Scores { user, model }
}

/// `(model - user) / 10 * 100`.
///
/// Positive means the model did better, negative the human. The divisor is
/// the nominal sample size even when fewer questions were drawn.
pub fn percent_difference(user: u32, model: u32) -> f64 {
    (f64::from(model) - f64::from(user)) * 100.0 / SAMPLE_SIZE as f64
}
