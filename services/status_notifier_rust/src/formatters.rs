use homework_rust_core::error::{NotifierError, Result};
use homework_rust_core::{HomeworkRecord, HomeworkStatus};
use log::debug;
use serde_json::Value;

/// Build the status-change message for a homework record.
///
/// `homework_name` is checked before `status`. A non-string name is rendered
/// as its JSON text; a non-string or unknown status is an error.
pub fn parse_status(homework: &HomeworkRecord) -> Result<String> {
    debug!("Parsing homework status");

    let name = homework
        .homework_name
        .as_ref()
        .map(render_name)
        .ok_or(NotifierError::MissingKey {
            key: "homework_name",
        })?;
    let raw_status = homework
        .status
        .as_ref()
        .ok_or(NotifierError::MissingKey { key: "status" })?;
    let status: HomeworkStatus = match raw_status {
        Value::String(s) => s.parse()?,
        other => {
            return Err(NotifierError::UnknownStatus {
                status: other.to_string(),
            })
        }
    };

    debug!("Recognised status: {}", status);
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn render_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Chat text for a failed polling cycle
pub fn format_failure(error: &NotifierError) -> String {
    format!("Сбой в работе программы: {}", error)
}
