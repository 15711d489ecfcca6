//! Quiz session state machine.
//!
//! A session moves `Intake → Quiz → Results` and never goes back. Starting
//! over means dropping the session and creating a new one.
//!
//! ```text
//! Intake --start()--> Quiz --advance() on last question--> Results
//!                      ^  |
//!                      +--+ select() / advance()
//! ```

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::model::{
    OptionLetter, Participant, Question, ResultRecord, MAX_DIFFICULTY, MIN_DIFFICULTY, SAMPLE_SIZE,
};
use crate::pool::QuestionPool;
use crate::report::{QuestionTrace, SessionReport};
use crate::scoring::{score, Scores};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Intake,
    Quiz,
    Results,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Intake => write!(f, "intake"),
            Phase::Quiz => write!(f, "quiz"),
            Phase::Results => write!(f, "results"),
        }
    }
}

/// Outcome of a successful [`QuizSession::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved on to the next question.
    Next,
    /// That was the last question; the session is now in results.
    Finished(ResultRecord),
}

/// One participant's pass through a sample of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    id: Uuid,
    phase: Phase,
    participant: Option<Participant>,
    difficulty: u8,
    questions: Vec<Question>,
    answers: HashMap<i64, OptionLetter>,
    cursor: usize,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizSession {
    /// A fresh session in intake.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Intake,
            participant: None,
            difficulty: MIN_DIFFICULTY,
            questions: Vec::new(),
            answers: HashMap::new(),
            cursor: 0,
            completed_at: None,
        }
    }

    /// Leave intake and draw the questions for this session.
    ///
    /// Keeps at most [`SAMPLE_SIZE`] questions of the chosen tier in a
    /// random order fixed for the rest of the session. If the tier has no
    /// questions the session stays in intake.
    pub fn start<R: Rng + ?Sized>(
        &mut self,
        participant: Participant,
        difficulty: u8,
        pool: &QuestionPool,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.expect_phase(Phase::Intake, "start")?;
        if !participant.is_complete() {
            return Err(SessionError::MissingParticipant);
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(SessionError::InvalidDifficulty(difficulty));
        }

        let mut drawn: Vec<Question> = pool.by_difficulty(difficulty).into_iter().cloned().collect();
        if drawn.is_empty() {
            return Err(SessionError::NoQuestionsAvailable { difficulty });
        }
        drawn.shuffle(rng);
        drawn.truncate(SAMPLE_SIZE);

        tracing::debug!(
            session = %self.id,
            "starting session at difficulty {difficulty} with {} questions",
            drawn.len()
        );

        self.participant = Some(participant);
        self.difficulty = difficulty;
        self.questions = drawn;
        self.cursor = 0;
        self.phase = Phase::Quiz;
        Ok(())
    }

    /// Record the participant's choice for the current question.
    ///
    /// Choosing again before advancing replaces the earlier choice.
    pub fn select(&mut self, letter: OptionLetter) -> Result<(), SessionError> {
        self.expect_phase(Phase::Quiz, "select an answer")?;
        let id = self.questions[self.cursor].id;
        self.answers.insert(id, letter);
        Ok(())
    }

    /// Move past the current question.
    ///
    /// Requires a selection for the current question. Advancing past the
    /// last question finishes the session and returns its result record.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.expect_phase(Phase::Quiz, "advance")?;
        if self.selected().is_none() {
            return Err(SessionError::NoSelection);
        }

        if self.cursor + 1 < self.questions.len() {
            self.cursor += 1;
            return Ok(Advance::Next);
        }

        self.cursor = self.questions.len();
        self.phase = Phase::Results;
        self.completed_at = Some(Utc::now());

        let record = self
            .result_record()
            .ok_or(SessionError::WrongPhase {
                action: "finish",
                phase: self.phase,
            })?;
        tracing::info!(
            session = %self.id,
            "session finished: user {} / model {}",
            record.user_score,
            record.model_score
        );
        Ok(Advance::Finished(record))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn participant(&self) -> Option<&Participant> {
        self.participant.as_ref()
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// The sampled questions in play order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &HashMap<i64, OptionLetter> {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The question being answered, while in quiz.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Quiz => self.questions.get(self.cursor),
            _ => None,
        }
    }

    /// The selection for the current question, if any.
    pub fn selected(&self) -> Option<OptionLetter> {
        self.current_question()
            .and_then(|q| self.answers.get(&q.id).copied())
    }

    /// One-based position of the current question and the sample size.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.questions.len();
        ((self.cursor + 1).min(total), total)
    }

    /// Whether the current question is the last one.
    pub fn is_last_question(&self) -> bool {
        self.phase == Phase::Quiz && self.cursor + 1 == self.questions.len()
    }

    /// Scores over the sampled questions.
    pub fn scores(&self) -> Scores {
        score(&self.questions, &self.answers)
    }

    /// The result record, once the session has reached results.
    pub fn result_record(&self) -> Option<ResultRecord> {
        if self.phase != Phase::Results {
            return None;
        }
        let participant = self.participant.as_ref()?;
        let scores = self.scores();
        Some(ResultRecord {
            session_id: self.id,
            name: participant.name.clone(),
            position: participant.position.clone(),
            selected_difficulty: self.difficulty,
            user_score: scores.user,
            model_score: scores.model,
            percent_difference: scores.percent_difference(),
            completed_at: self.completed_at.unwrap_or_else(Utc::now),
        })
    }

    /// The audit report for a finished session.
    pub fn report(&self, model_label: &str) -> Option<SessionReport> {
        let record = self.result_record()?;
        let participant = self.participant.clone()?;
        let traces = self
            .questions
            .iter()
            .map(|q| QuestionTrace::new(q, self.answers.get(&q.id).copied()))
            .collect();

        Some(SessionReport {
            id: self.id,
            created_at: record.completed_at,
            participant,
            difficulty: self.difficulty,
            model_label: model_label.to_string(),
            scores: self.scores(),
            percent_difference: record.percent_difference,
            traces,
        })
    }

    fn expect_phase(&self, expected: Phase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                action,
                phase: self.phase,
            })
        }
    }
}
