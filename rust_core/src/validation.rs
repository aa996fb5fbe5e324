//! Structural checks on the homework API answer.
//!
//! Only the envelope is validated here. Fields inside individual homework
//! records are checked later, when a record is turned into a message.

use serde_json::Value;
use tracing::debug;

use crate::error::{NotifierError, Result};

/// Keys every answer must carry, in the order they are checked
pub const REQUIRED_KEYS: [&str; 2] = ["homeworks", "current_date"];

/// Validate the shape of an API answer.
///
/// Rules, first failure wins:
/// 1. the answer is a JSON object
/// 2. it has `homeworks` and `current_date`
/// 3. `homeworks` is an array (possibly empty)
pub fn check_response(response: &Value) -> Result<()> {
    debug!("Checking response structure");

    let obj = response.as_object().ok_or(NotifierError::TypeMismatch {
        field: "response",
        expected: "object",
        actual: json_type_name(response),
    })?;

    for key in REQUIRED_KEYS {
        if !obj.contains_key(key) {
            return Err(NotifierError::MissingKey { key });
        }
    }

    let homeworks = &obj["homeworks"];
    if !homeworks.is_array() {
        return Err(NotifierError::TypeMismatch {
            field: "homeworks",
            expected: "array",
            actual: json_type_name(homeworks),
        });
    }

    debug!("Response structure is valid");
    Ok(())
}

pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        let err = check_response(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            err,
            NotifierError::TypeMismatch {
                field: "response",
                expected: "object",
                actual: "array",
            }
        );
    }

    #[test]
    fn test_rejects_missing_homeworks() {
        let err = check_response(&json!({"current_date": 1})).unwrap_err();
        assert_eq!(err, NotifierError::MissingKey { key: "homeworks" });
    }

    #[test]
    fn test_rejects_missing_current_date() {
        let err = check_response(&json!({"homeworks": []})).unwrap_err();
        assert_eq!(err, NotifierError::MissingKey { key: "current_date" });
    }

    #[test]
    fn test_reports_homeworks_first_when_both_missing() {
        let err = check_response(&json!({})).unwrap_err();
        assert_eq!(err, NotifierError::MissingKey { key: "homeworks" });
    }

    #[test]
    fn test_rejects_non_array_homeworks() {
        let err = check_response(&json!({
            "homeworks": {"homework_name": "proj1"},
            "current_date": 1,
        }))
        .unwrap_err();
        assert_eq!(
            err,
            NotifierError::TypeMismatch {
                field: "homeworks",
                expected: "array",
                actual: "object",
            }
        );
    }

    #[test]
    fn test_accepts_empty_homeworks() {
        assert!(check_response(&json!({"homeworks": [], "current_date": 0})).is_ok());
    }

    #[test]
    fn test_accepts_populated_homeworks() {
        let response = json!({
            "homeworks": [{"homework_name": "proj1", "status": "approved"}],
            "current_date": 1700000000,
        });
        assert!(check_response(&response).is_ok());
    }
}
