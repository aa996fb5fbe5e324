// Shared models for the homework status notifier
use chrono::{DateTime, Duration, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{NotifierError, Result};
use crate::validation::json_type_name;

/// How far back the first poll looks.
pub const INITIAL_LOOKBACK_DAYS: i64 = 30;

/// Lower bound for the very first `from_date` query.
pub fn initial_cursor(now: DateTime<Utc>) -> i64 {
    (now - Duration::days(INITIAL_LOOKBACK_DAYS)).timestamp()
}

// ============================================================================
// Review Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable review outcome sent to the chat
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = NotifierError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(NotifierError::UnknownStatus {
                status: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// Homework Records
// ============================================================================

/// One submission as reported by the API.
///
/// Fields are kept as raw JSON: they are only interpreted once the record
/// has to be turned into a message. JSON `null` counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: Option<Value>,
    pub status: Option<Value>,
}

impl HomeworkRecord {
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or(NotifierError::TypeMismatch {
            field: "homework",
            expected: "object",
            actual: json_type_name(value),
        })?;

        Ok(Self {
            homework_name: present(obj.get("homework_name")),
            status: present(obj.get("status")),
        })
    }
}

fn present(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

/// A validated API answer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeworkBatch {
    /// Most recent first
    pub homeworks: Vec<Value>,
    /// `None` when the API sent something other than an integer
    pub current_date: Option<i64>,
}

impl HomeworkBatch {
    /// Builds a batch from a response that already passed
    /// [`check_response`](crate::validation::check_response).
    pub fn from_checked(response: &Value) -> Self {
        let homeworks = response
            .get("homeworks")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let current_date = response.get("current_date").and_then(|v| v.as_i64());

        Self {
            homeworks,
            current_date,
        }
    }

    /// The most recent submission, if any
    pub fn latest(&self) -> Option<Result<HomeworkRecord>> {
        self.homeworks.first().map(HomeworkRecord::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            HomeworkStatus::Approved,
            HomeworkStatus::Reviewing,
            HomeworkStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<HomeworkStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "in_progress".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(
            err,
            NotifierError::UnknownStatus {
                status: "in_progress".to_string()
            }
        );
    }

    #[test]
    fn test_initial_cursor_is_thirty_days_back() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        assert_eq!(initial_cursor(now), now.timestamp() - 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_record_ignores_extra_fields() {
        let record = HomeworkRecord::from_value(&json!({
            "id": 124,
            "homework_name": "proj1",
            "status": "approved",
            "reviewer_comment": "ok",
        }))
        .unwrap();
        assert_eq!(record.homework_name, Some(json!("proj1")));
        assert_eq!(record.status, Some(json!("approved")));
    }

    #[test]
    fn test_record_with_missing_fields_parses() {
        let record = HomeworkRecord::from_value(&json!({})).unwrap();
        assert_eq!(record, HomeworkRecord::default());
    }

    #[test]
    fn test_record_keeps_non_string_fields_raw() {
        let record = HomeworkRecord::from_value(&json!({
            "homework_name": 42,
            "status": null,
        }))
        .unwrap();
        assert_eq!(record.homework_name, Some(json!(42)));
        assert_eq!(record.status, None);
    }

    #[test]
    fn test_record_must_be_object() {
        let err = HomeworkRecord::from_value(&json!("proj1")).unwrap_err();
        assert_eq!(err.kind(), "type_mismatch");
    }

    #[test]
    fn test_batch_keeps_non_integer_current_date_as_none() {
        let batch = HomeworkBatch::from_checked(&json!({
            "homeworks": [],
            "current_date": null,
        }));
        assert!(batch.homeworks.is_empty());
        assert_eq!(batch.current_date, None);
        assert!(batch.latest().is_none());
    }

    #[test]
    fn test_batch_latest_is_first_record() {
        let batch = HomeworkBatch::from_checked(&json!({
            "homeworks": [
                {"homework_name": "new", "status": "reviewing"},
                {"homework_name": "old", "status": "approved"},
            ],
            "current_date": 1700000000,
        }));
        let latest = batch.latest().unwrap().unwrap();
        assert_eq!(latest.homework_name, Some(json!("new")));
        assert_eq!(batch.current_date, Some(1_700_000_000));
    }
}
