//! Export/import codec
//!
//! Export payloads are Base64 (standard alphabet, padded) of the UTF-8 JSON of
//! either one quiz or the collection envelope `{"version":1,"quizzes":[...]}`.
//! The result is plain ASCII and survives copy/paste through any text field.
//!
//! Import is lenient. It takes raw JSON or Base64 JSON and recognises three
//! shapes: an object with a `quizzes` array, a bare array, or a single object
//! with truthy `id` and `title`. Every recognised entry is normalized into a
//! fresh record; ids in the payload are never reused. Questions that are
//! present must follow the answer rules of the entry's type, and an enabled
//! time challenge must have positive timings.

use crate::id::QuizId;
use crate::quiz::{Question, Quiz, QuizType, TimeChallenge};
use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Version marker written into collection exports
pub const EXPORT_VERSION: u32 = 1;

/// Title given to imported entries that have none
pub const UNTITLED: &str = "Untitled";

#[derive(Serialize)]
struct CollectionExport<'a> {
    version: u32,
    quizzes: &'a [Quiz],
}

/// Base64-encode the UTF-8 bytes of a JSON document
pub fn encode_payload(json: &str) -> String {
    STANDARD.encode(json.as_bytes())
}

/// Export one quiz as a copy/paste-safe string
pub fn export_quiz(quiz: &Quiz) -> Result<String> {
    let json = serde_json::to_string(quiz)?;
    Ok(encode_payload(&json))
}

/// Export a whole collection inside the versioned envelope
pub fn export_collection(quizzes: &[Quiz]) -> Result<String> {
    let json = serde_json::to_string(&CollectionExport {
        version: EXPORT_VERSION,
        quizzes,
    })?;
    Ok(encode_payload(&json))
}

/// Parse import text: raw JSON first, then Base64-wrapped JSON.
pub fn parse_import(text: &str) -> Result<Value> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::ImportFormat("no input given".to_string()));
    }

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    // Pasted Base64 is often wrapped across lines
    let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .and_then(|json| serde_json::from_str::<Value>(&json).ok())
        .ok_or_else(|| {
            Error::ImportFormat("input is neither JSON nor Base64-encoded JSON".to_string())
        })
}

/// Pick the quiz entries out of a parsed payload
pub fn quiz_entries(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            match map.remove("quizzes") {
                Some(Value::Array(items)) => return Ok(items),
                Some(other) => {
                    map.insert("quizzes".to_string(), other);
                }
                None => {}
            }
            if is_truthy(map.get("id")) && is_truthy(map.get("title")) {
                Ok(vec![Value::Object(map)])
            } else {
                Err(unknown_format())
            }
        }
        _ => Err(unknown_format()),
    }
}

fn unknown_format() -> Error {
    Error::ImportFormat(
        "unrecognised payload: expected an export, a list of quizzes or a single quiz".to_string(),
    )
}

/// JavaScript-style truthiness, which is what exported payloads were written against
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Turn one payload entry into a fresh quiz record.
///
/// `position` is 1-based and only used in error messages.
pub fn normalize_entry(entry: Value, position: usize, id: QuizId, now: DateTime<Utc>) -> Result<Quiz> {
    let Value::Object(map) = entry else {
        return Err(Error::ImportFormat(format!(
            "entry {} is not a quiz object",
            position
        )));
    };

    let title = match map.get("title") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        _ => UNTITLED.to_string(),
    };

    let (quiz_type, timed_selector) = match map.get("type").and_then(Value::as_str) {
        Some(selector) => QuizType::parse_selector(selector).unwrap_or_else(|_| {
            tracing::warn!(position, selector, "unknown quiz type in import, using single-choice");
            (QuizType::default(), false)
        }),
        None => (QuizType::default(), false),
    };

    let questions = match map.get("questions") {
        None | Some(Value::Null) => Vec::new(),
        Some(raw) => serde_json::from_value::<Vec<Question>>(raw.clone()).map_err(|e| {
            Error::ImportFormat(format!("entry {} has malformed questions: {}", position, e))
        })?,
    };

    for (i, question) in questions.iter().enumerate() {
        question.check(quiz_type).map_err(|msg| {
            Error::ImportFormat(format!("entry {}, question {}: {}", position, i + 1, msg))
        })?;
    }

    let time_challenge = normalize_time_challenge(&map, position, timed_selector)?;

    Ok(Quiz {
        id,
        title,
        quiz_type,
        questions,
        time_challenge,
        created_at: now,
        updated_at: now,
    })
}

fn normalize_time_challenge(
    map: &Map<String, Value>,
    position: usize,
    timed_selector: bool,
) -> Result<Option<TimeChallenge>> {
    let carried = match map.get("timeChallenge") {
        None | Some(Value::Null) => None,
        Some(raw) => match serde_json::from_value::<TimeChallenge>(raw.clone()) {
            Ok(tc) => Some(tc),
            Err(e) => {
                tracing::warn!(position, error = %e, "dropping malformed time challenge");
                None
            }
        },
    };

    let time_challenge = match (carried, timed_selector) {
        (Some(tc), true) => Some(TimeChallenge { enabled: true, ..tc }),
        (Some(tc), false) => Some(tc),
        (None, true) => Some(TimeChallenge {
            enabled: true,
            ..TimeChallenge::default()
        }),
        (None, false) => None,
    };

    match time_challenge {
        Some(tc) if tc.enabled && !tc.has_positive_timings() => Err(Error::ImportFormat(format!(
            "entry {} has a time challenge with non-positive timings",
            position
        ))),
        Some(tc) => Ok(Some(TimeChallenge {
            repeat_wrong_questions: true,
            ..tc
        })),
        None => Ok(None),
    }
}
