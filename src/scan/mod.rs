//! Results-file reading with defensive JSON parsing

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::domain::Violation;

/// Payloads that mean "no issues" without going through the JSON parser.
const EMPTY_SENTINELS: [&str; 3] = ["", "[]", r#"{"issues": []}"#];

/// Reads and parses the results file. Missing or unreadable files are
/// logged and treated as "no issues"; they never fail the run.
pub fn read_results(path: &Path) -> Option<Vec<Violation>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!("Failed reading results file {}: {}", path.display(), err);
            return None;
        }
    };
    parse_results(&raw)
}

/// Returns `None` for "no issues" or a non-empty violation list.
///
/// Accepts a top-level array or an object carrying an `issues` array; any
/// other shape, an empty list, or malformed JSON collapses to `None`. A
/// malformed payload is indistinguishable from a clean scan in the output,
/// so the parse failure is at least surfaced in the logs.
pub fn parse_results(raw: &str) -> Option<Vec<Violation>> {
    let trimmed = raw.trim();
    if EMPTY_SENTINELS.contains(&trimmed) {
        return None;
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("Results file is not valid JSON, treating as no issues: {}", err);
            return None;
        }
    };

    let list = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("issues") {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    if list.is_empty() {
        return None;
    }

    Some(list.iter().map(Violation::from_value).collect())
}
