//! Extraction of the meal-name array from free-form model output.
//!
//! The model is asked for a bare JSON array but often wraps it in prose or
//! code fences. Array boundaries are found with a bracket-balance scan that
//! ignores brackets inside JSON string literals.

use serde_json::Value;

use crate::error::{PlannerError, Result};
use crate::types::MealName;

/// Return the balanced `[...]` span starting at byte `start`, if it closes.
fn balanced_array_at(text: &str, start: usize) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Locate the array that starts at the first `[` in `text` and parse it.
///
/// Only that one span is considered. It must balance, parse as JSON and be
/// an array; a later bracket never stands in for a malformed first one.
pub fn find_json_array(text: &str) -> Result<Vec<Value>> {
    let start = text
        .find('[')
        .ok_or_else(|| PlannerError::invalid_format("no JSON array found", text))?;
    let span = balanced_array_at(text, start)
        .ok_or_else(|| PlannerError::invalid_format("unterminated JSON array", text))?;

    match serde_json::from_str::<Value>(span) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(other) => Err(PlannerError::invalid_format(
            format!("expected a JSON array, found {other}"),
            text,
        )),
        Err(e) => Err(PlannerError::invalid_format(
            format!("bracketed text is not valid JSON: {e}"),
            text,
        )),
    }
}

/// Parse model output into a typed list of meal names.
///
/// Fails with `InvalidGenerationFormat` (carrying `raw`) when the first
/// bracketed span is missing, unbalanced or not a JSON array, or when an
/// element is not a string.
pub fn parse_meal_names(raw: &str) -> Result<Vec<MealName>> {
    let items = find_json_array(raw)?;

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(name) => Ok(name),
            other => Err(PlannerError::invalid_format(
                format!("element {i} is not a string: {other}"),
                raw,
            )),
        })
        .collect()
}
