//! Raw record normalization.
//!
//! Source records carry the question, its options, and the ground-truth
//! answer inside one free-text blob, and name their model fields after the
//! model that produced them (`correctness_<model>`, `response_<model>`).
//! [`normalize`] turns such a record into a [`Question`], falling back to
//! fixed defaults wherever a marker is missing. It never fails.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::model::{OptionLetter, Question};

/// Field holding the combined question/explanation blob.
pub const BLOB_FIELD: &str = "question_and_explanation";
/// Prefix of the field saying whether the model was right.
pub const CORRECTNESS_PREFIX: &str = "correctness_";
/// Prefix of the field holding the model's response.
pub const RESPONSE_PREFIX: &str = "response_";
/// Answer used when the blob has no answer marker.
pub const DEFAULT_ANSWER: OptionLetter = OptionLetter::C;
/// Question text used when the blob has no question block.
pub const MISSING_QUESTION_TEXT: &str = "Question text not found.";

fn answer_colon_re() -> &'static Regex {
    static ANSWER_COLON_RE: OnceLock<Regex> = OnceLock::new();
    ANSWER_COLON_RE
        .get_or_init(|| Regex::new(r"(?i)<Answer>:\s*([A-D])").expect("valid answer regex"))
}

fn answer_tag_re() -> &'static Regex {
    static ANSWER_TAG_RE: OnceLock<Regex> = OnceLock::new();
    ANSWER_TAG_RE
        .get_or_init(|| Regex::new(r"(?i)<Answer>([A-D])</Answer>").expect("valid answer regex"))
}

fn question_re() -> &'static Regex {
    static QUESTION_RE: OnceLock<Regex> = OnceLock::new();
    QUESTION_RE.get_or_init(|| {
        Regex::new(r"(?s)<Question>\r?\n\[(.*?)\]\r?\n</Question>").expect("valid question regex")
    })
}

fn options_re() -> &'static Regex {
    static OPTIONS_RE: OnceLock<Regex> = OnceLock::new();
    OPTIONS_RE
        .get_or_init(|| Regex::new(r"(?s)<Options>(.*?)</Options>").expect("valid options regex"))
}

/// Build a [`Question`] from a raw source record.
pub fn normalize(raw: &Map<String, Value>) -> Question {
    let blob = raw.get(BLOB_FIELD).and_then(Value::as_str).unwrap_or("");

    let correct_answer = extract_answer(blob).unwrap_or(DEFAULT_ANSWER);
    let question_text = extract_question_text(blob)
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| MISSING_QUESTION_TEXT.to_string());
    let options = extract_options(blob).unwrap_or_default();

    let model_correct = find_prefixed(raw, CORRECTNESS_PREFIX)
        .map(|(_, value)| is_affirmative(value))
        .unwrap_or(false);
    let raw_response = find_prefixed(raw, RESPONSE_PREFIX)
        .map(|(_, value)| value_to_string(value))
        .unwrap_or_default();

    Question {
        id: read_integer(raw.get("id")).unwrap_or(0),
        k_hops: read_integer(raw.get("k_hops")).unwrap_or(0),
        question_text,
        options,
        correct_answer,
        model_explanation: raw_response.clone(),
        model_correct,
        raw_response,
    }
}

/// Find the answer letter in a blob.
///
/// Accepts `<Answer>: X` and `<Answer>X</Answer>`, case-insensitively. The
/// colon form is tried first.
pub fn extract_answer(blob: &str) -> Option<OptionLetter> {
    answer_colon_re()
        .captures(blob)
        .or_else(|| answer_tag_re().captures(blob))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Find the bracketed text inside the `<Question>` block.
pub fn extract_question_text(blob: &str) -> Option<String> {
    question_re()
        .captures(blob)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Find the option lines inside the `<Options>` block.
///
/// Lines are trimmed and blank ones dropped; only the first four are kept
/// since there are only four letters to answer with.
pub fn extract_options(blob: &str) -> Option<Vec<String>> {
    let block = options_re().captures(blob)?.get(1)?.as_str();
    Some(
        block
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .take(OptionLetter::ALL.len())
            .map(str::to_string)
            .collect(),
    )
}

/// Find a field whose name starts with `prefix`.
///
/// If several fields match, the first one in the map's iteration order wins.
/// That order is not something the source format defines, so which one is
/// picked for such a record is unspecified; `validate` reports these records.
pub fn find_prefixed<'a>(
    raw: &'a Map<String, Value>,
    prefix: &str,
) -> Option<(&'a String, &'a Value)> {
    raw.iter().find(|(key, _)| key.starts_with(prefix))
}

/// Names of every field starting with `prefix`.
pub fn prefixed_fields<'a>(raw: &'a Map<String, Value>, prefix: &'a str) -> Vec<&'a str> {
    raw.keys()
        .filter(|key| key.starts_with(prefix))
        .map(String::as_str)
        .collect()
}

/// Substring match, so "Yes, because..." and "yes" both count.
fn is_affirmative(value: &Value) -> bool {
    value_to_string(value).to_lowercase().contains("yes")
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Read an integer field, accepting integral numbers and numeric strings.
pub fn read_integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
