//! Question pool loading and partitioning.
//!
//! Reads a JSON question file, normalizes every record, and exposes the
//! read-only per-difficulty view the presentation layer draws from.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::model::Question;
use crate::normalizer::{normalize, read_integer};

/// Read the raw records from a question file.
///
/// The file must hold a JSON array. Entries that are not objects are
/// skipped with a warning.
pub fn load_records(path: &Path) -> Result<Vec<Map<String, Value>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;

    parse_records_str(&content)
        .with_context(|| format!("failed to parse question file: {}", path.display()))
}

/// Parse raw records from a JSON string (useful for testing).
pub fn parse_records_str(content: &str) -> Result<Vec<Map<String, Value>>> {
    let entries: Vec<Value> =
        serde_json::from_str(content).context("question file must be a JSON array")?;

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry {
            Value::Object(map) => Some(map),
            other => {
                tracing::warn!("skipping entry {index}: expected an object, got {other}");
                None
            }
        })
        .collect())
}

/// An immutable collection of normalized questions.
#[derive(Debug, Clone, Default)]
pub struct QuestionPool {
    questions: Vec<Question>,
}

impl QuestionPool {
    /// Build a pool, keeping the first question for each id.
    ///
    /// Sessions key answers by question id, so ids must be unique.
    pub fn new(questions: Vec<Question>) -> Self {
        let mut seen = HashSet::new();
        let questions = questions
            .into_iter()
            .filter(|q| {
                let fresh = seen.insert(q.id);
                if !fresh {
                    tracing::warn!("skipping question with duplicate id {}", q.id);
                }
                fresh
            })
            .collect();
        Self { questions }
    }

    /// Normalize a set of raw records into a pool.
    ///
    /// Records without an integer id are skipped with a warning.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let questions = records
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                if read_integer(raw.get("id")).is_none() {
                    tracing::warn!("skipping record {index}: missing or non-integer id");
                    return None;
                }
                Some(normalize(raw))
            })
            .collect();
        Self::new(questions)
    }

    /// Load and normalize a question file.
    pub fn load(path: &Path) -> Result<Self> {
        let records = load_records(path)?;
        let pool = Self::from_records(&records);
        tracing::debug!(
            "loaded {} questions from {}",
            pool.questions.len(),
            path.display()
        );
        Ok(pool)
    }

    /// Load a question file, degrading to an empty pool if it cannot be read.
    ///
    /// The error is logged; callers then see the empty-pool behavior at
    /// session start.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(pool) => pool,
            Err(e) => {
                tracing::error!("error loading questions: {e:#}");
                Self::default()
            }
        }
    }

    /// Every question, in source order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions at one difficulty tier, in source order.
    pub fn by_difficulty(&self, tier: u8) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|q| q.k_hops == i64::from(tier))
            .collect()
    }

    /// Number of questions per tier.
    pub fn difficulty_counts(&self) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for q in &self.questions {
            *counts.entry(q.k_hops).or_insert(0) += 1;
        }
        counts
    }
}

/// Load a question file and return the questions at one tier.
pub fn questions_by_difficulty(path: &Path, tier: u8) -> Result<Vec<Question>> {
    let pool = QuestionPool::load(path)?;
    Ok(pool.by_difficulty(tier).into_iter().cloned().collect())
}
