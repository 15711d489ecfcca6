//! Core data model types for hopbench.
//!
//! These are the types the rest of the system passes around: the canonical
//! question, the answer letters, the participant, and the write-once result
//! record handed to the result store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lowest selectable difficulty tier.
pub const MIN_DIFFICULTY: u8 = 1;
/// Highest selectable difficulty tier.
pub const MAX_DIFFICULTY: u8 = 5;
/// Number of questions drawn into one session.
pub const SAMPLE_SIZE: usize = 10;

/// A multi-hop question in canonical form.
///
/// Built once from a raw source record and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within a pool.
    pub id: i64,
    /// Difficulty tier (number of reasoning hops).
    pub k_hops: i64,
    /// The natural-language prompt.
    pub question_text: String,
    /// Answer options, positionally lettered A..D.
    #[serde(default)]
    pub options: Vec<String>,
    /// The ground-truth letter.
    pub correct_answer: OptionLetter,
    /// The model's rationale, shown for audit.
    #[serde(default)]
    pub model_explanation: String,
    /// Whether the model answered this question correctly.
    #[serde(default)]
    pub model_correct: bool,
    /// The model's raw response text.
    #[serde(default)]
    pub raw_response: String,
}

impl Question {
    /// Options paired with their letters.
    pub fn lettered_options(&self) -> impl Iterator<Item = (OptionLetter, &str)> {
        OptionLetter::ALL
            .iter()
            .copied()
            .zip(self.options.iter().map(String::as_str))
    }
}

/// One of the four answer letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// All letters in positional order.
    pub const ALL: [OptionLetter; 4] = [
        OptionLetter::A,
        OptionLetter::B,
        OptionLetter::C,
        OptionLetter::D,
    ];

    /// Letter for a zero-based option index, if there is one.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLetter::A => write!(f, "A"),
            OptionLetter::B => write!(f, "B"),
            OptionLetter::C => write!(f, "C"),
            OptionLetter::D => write!(f, "D"),
        }
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(OptionLetter::A),
            "B" => Ok(OptionLetter::B),
            "C" => Ok(OptionLetter::C),
            "D" => Ok(OptionLetter::D),
            other => Err(format!("unknown option letter: {other}")),
        }
    }
}

/// The person taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Researcher name or identifier.
    pub name: String,
    /// Role or title.
    pub position: String,
}

impl Participant {
    pub fn new(name: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
        }
    }

    /// Both fields are non-empty once trimmed.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.position.trim().is_empty()
    }
}

/// The record handed to the result store when a session finishes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Session that produced this record.
    pub session_id: Uuid,
    /// Participant name.
    pub name: String,
    /// Participant position.
    pub position: String,
    /// The difficulty tier played.
    pub selected_difficulty: u8,
    /// Questions the participant answered correctly.
    pub user_score: u32,
    /// Questions the model answered correctly.
    pub model_score: u32,
    /// Positive when the model did better, negative when the human did.
    pub percent_difference: f64,
    /// When the session reached its results.
    pub completed_at: DateTime<Utc>,
}
