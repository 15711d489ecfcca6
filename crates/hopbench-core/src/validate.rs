//! Question file validation.
//!
//! Normalization never fails, so problems in a source file only show up as
//! defaulted fields. Validation reports them up front.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::model::{MAX_DIFFICULTY, MIN_DIFFICULTY};
use crate::normalizer::{
    extract_answer, extract_options, extract_question_text, prefixed_fields, read_integer,
    BLOB_FIELD, CORRECTNESS_PREFIX, RESPONSE_PREFIX,
};

/// A warning from question file validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Position of the record in the file.
    pub index: usize,
    /// The record's id, if it has a usable one.
    pub record_id: Option<i64>,
    /// Warning message.
    pub message: String,
}

/// Validate raw records for issues that normalization would paper over.
pub fn validate_records(records: &[Map<String, Value>]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, raw) in records.iter().enumerate() {
        let record_id = read_integer(raw.get("id"));
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                index,
                record_id,
                message,
            })
        };

        match record_id {
            Some(id) if !seen_ids.insert(id) => warn(format!("duplicate id: {id}")),
            Some(_) => {}
            None => warn("missing or non-integer id".into()),
        }

        match read_integer(raw.get("k_hops")) {
            Some(k) if !(i64::from(MIN_DIFFICULTY)..=i64::from(MAX_DIFFICULTY)).contains(&k) => {
                warn(format!(
                    "k_hops {k} is outside {MIN_DIFFICULTY}..={MAX_DIFFICULTY} and can never be played"
                ))
            }
            Some(_) => {}
            None => warn("missing or non-integer k_hops".into()),
        }

        match raw.get(BLOB_FIELD).and_then(Value::as_str) {
            None => warn(format!("no {BLOB_FIELD} text")),
            Some(blob) => {
                if extract_answer(blob).is_none() {
                    warn("no answer marker, correct answer defaults to C".into());
                }
                if extract_question_text(blob).map_or(true, |t| t.trim().is_empty()) {
                    warn("no question text, placeholder used".into());
                }
                match extract_options(blob) {
                    None => warn("no options block".into()),
                    Some(options) if options.len() < 2 => {
                        warn(format!("only {} option(s)", options.len()))
                    }
                    Some(_) => {}
                }
                if count_option_lines(blob) > 4 {
                    warn("more than four options, extras are dropped".into());
                }
            }
        }

        for prefix in [CORRECTNESS_PREFIX, RESPONSE_PREFIX] {
            let fields = prefixed_fields(raw, prefix);
            if fields.len() > 1 {
                warn(format!(
                    "several {prefix}* fields ({}), which one is used is unspecified",
                    fields.join(", ")
                ));
            }
        }
    }

    warnings
}

fn count_option_lines(blob: &str) -> usize {
    let Some(start) = blob.find("<Options>") else {
        return 0;
    };
    let rest = &blob[start + "<Options>".len()..];
    let block = rest.find("</Options>").map_or("", |end| &rest[..end]);
    block.lines().filter(|l| !l.trim().is_empty()).count()
}
