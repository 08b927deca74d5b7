//! Sanitize and parse inference responses
//!
//! Models are instructed to emit a bare JSON array but routinely wrap it
//! in prose or code fences, and one known failure mode emits several
//! adjacent arrays. Sanitization repairs exactly those patterns;
//! everything else is a hard `ParseFailure` that costs the unit its turn.

use serde_json::Value;

use crate::battle::validator::Action;
use crate::core::error::{Result, SkirmishError};

/// Best-effort cleanup of a raw response
///
/// Trims whitespace, strips a single leading/trailing code-fence pair,
/// narrows to the outermost `[` .. `]` span, and merges adjacent arrays
/// by replacing `"], ["` with `", "`. Not a general repair pass: anything
/// still unparseable afterwards is rejected.
pub fn sanitize(raw: &str) -> String {
    let mut text = raw.trim();

    if text.starts_with("```") {
        // drop the fence line, including a language tag like ```json
        text = match text.find('\n') {
            Some(i) => &text[i + 1..],
            None => "",
        };
    }
    text = text.trim_end();
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }

    // Narrow to the array span; surrounding prose is not worth a rejection
    let narrowed = match (text.find('['), text.rfind(']')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    narrowed.replace("], [", ", ")
}

/// Parse a sanitized response into individual action objects
///
/// The response must be one JSON array; each element is handed back
/// untyped so the pipeline can reject elements one at a time.
pub fn parse_action_values(sanitized: &str) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_str(sanitized)
        .map_err(|e| SkirmishError::ParseFailure(e.to_string()))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(SkirmishError::ParseFailure(format!(
            "expected a JSON array, got {}",
            kind_of(&other)
        ))),
    }
}

/// Convert one untyped action object into a typed `Action`
///
/// Missing or wrong-typed fields and unknown action types become
/// `MalformedAction`; a well-formed action naming the wrong unit becomes
/// `UnitMismatch`.
pub fn action_from_value(value: &Value, acting_unit: &str) -> Result<Action> {
    let action: Action = serde_json::from_value(value.clone())
        .map_err(|e| SkirmishError::MalformedAction(e.to_string()))?;
    if action.unit_name() != acting_unit {
        return Err(SkirmishError::UnitMismatch);
    }
    Ok(action)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVE_JSON: &str =
        r#"{"unit_name": "enemy1", "action_type": "MOVE", "target_x": 6, "target_y": 6}"#;
    const ATTACK_JSON: &str =
        r#"{"unit_name": "enemy1", "action_type": "ATTACK", "target_unit_name": "ally1"}"#;

    #[test]
    fn test_sanitize_plain_array_untouched() {
        let raw = format!("[{}]", MOVE_JSON);
        assert_eq!(sanitize(&raw), raw);
    }

    #[test]
    fn test_sanitize_strips_code_fences() {
        let raw = format!("```json\n[{}]\n```", MOVE_JSON);
        let actions = parse_action_values(&sanitize(&raw)).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_sanitize_merges_adjacent_arrays() {
        // "[{...}], [{...}]" becomes one two-element array
        let raw = format!("[{}], [{}]", MOVE_JSON, ATTACK_JSON);
        let actions = parse_action_values(&sanitize(&raw)).unwrap();
        assert_eq!(actions.len(), 2);
    }

    #[test]
    fn test_sanitize_ignores_surrounding_prose() {
        let raw = format!("Here is my plan:\n[{}]\nGood luck!", ATTACK_JSON);
        let actions = parse_action_values(&sanitize(&raw)).unwrap();
        assert_eq!(actions.len(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_action_values(&sanitize("I refuse to answer")),
            Err(SkirmishError::ParseFailure(_))
        ));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        assert!(matches!(
            parse_action_values(MOVE_JSON),
            Err(SkirmishError::ParseFailure(_))
        ));
    }

    #[test]
    fn test_parse_empty_array() {
        let actions = parse_action_values("[]").unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_action_from_value_happy_path() {
        let value: Value = serde_json::from_str(ATTACK_JSON).unwrap();
        let action = action_from_value(&value, "enemy1").unwrap();
        assert_eq!(action.unit_name(), "enemy1");
    }

    #[test]
    fn test_action_from_value_missing_field() {
        let value: Value =
            serde_json::from_str(r#"{"unit_name": "enemy1", "action_type": "MOVE"}"#).unwrap();
        assert!(matches!(
            action_from_value(&value, "enemy1"),
            Err(SkirmishError::MalformedAction(_))
        ));
    }

    #[test]
    fn test_action_from_value_unknown_action_type() {
        let value: Value =
            serde_json::from_str(r#"{"unit_name": "enemy1", "action_type": "TELEPORT"}"#).unwrap();
        assert!(matches!(
            action_from_value(&value, "enemy1"),
            Err(SkirmishError::MalformedAction(_))
        ));
    }

    #[test]
    fn test_action_from_value_wrong_unit() {
        let value: Value = serde_json::from_str(MOVE_JSON).unwrap();
        assert!(matches!(
            action_from_value(&value, "enemy2"),
            Err(SkirmishError::UnitMismatch)
        ));
    }
}
