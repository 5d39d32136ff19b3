//! Best-effort recovery of a JSON object from free-form model output.
//!
//! Replies arrive as prose, as a fenced code block, or as bare JSON. The
//! strategies below are tried in order and the first one yielding a JSON
//! object wins:
//!
//! 1. the bodies of fenced blocks: every ```` ```json ```` block, then every
//!    untagged ```` ``` ```` block; blocks tagged with another language are skipped
//! 2. the whole reply, trimmed
//! 3. the span from the first `{` to the last `}`

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```([\w+-]*)\s*(.*?)```").expect("FENCED_BLOCK is a valid regex pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonRecoveryError {
    #[error("no JSON could be parsed from the response")]
    NoJsonFound,

    #[error("response JSON is a {0}, expected an object")]
    NotAnObject(&'static str),
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn candidates(raw: &str) -> Vec<&str> {
    let mut tagged = Vec::new();
    let mut untagged = Vec::new();

    for block in FENCED_BLOCK.captures_iter(raw) {
        let tag = block.get(1).map_or("", |m| m.as_str());
        let Some(body) = block.get(2) else { continue };
        if tag.eq_ignore_ascii_case("json") {
            tagged.push(body.as_str().trim());
        } else if tag.is_empty() {
            untagged.push(body.as_str().trim());
        }
    }

    let mut found = tagged;
    found.append(&mut untagged);

    found.push(raw.trim());

    if let (Some(start), Some(end)) = (raw.find('{'), raw.rfind('}')) {
        if start < end {
            found.push(&raw[start..=end]);
        }
    }

    found
}

/// Recover the JSON object embedded in `raw`.
pub fn recover_json_object(raw: &str) -> Result<Map<String, Value>, JsonRecoveryError> {
    let mut non_object = None;

    for candidate in candidates(raw) {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Object(map)) => return Ok(map),
            Ok(other) => {
                non_object.get_or_insert(kind_of(&other));
            }
            Err(_) => continue,
        }
    }

    Err(match non_object {
        Some(kind) => JsonRecoveryError::NotAnObject(kind),
        None => JsonRecoveryError::NoJsonFound,
    })
}

/// First `limit` characters of a reply, for diagnostics.
pub fn response_prefix(raw: &str, limit: usize) -> &str {
    match raw.char_indices().nth(limit) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
