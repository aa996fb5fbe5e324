//! Classified failures raised while polling, validating and notifying.
//!
//! Display strings are the texts that end up in the chat, so they are written
//! for the homework owner. Structured fields stay available for logging and
//! for de-duplicating repeated alerts via [`NotifierError::fingerprint`].

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    /// Connection refused, DNS failure, timeout and the like
    #[error("Ошибка запроса к API: {reason}")]
    Transport { reason: String },

    #[error("Эндпоинт {endpoint} недоступен. Параметры: {params}. Код ответа API: {status}")]
    EndpointUnavailable {
        endpoint: String,
        params: String,
        status: u16,
    },

    #[error("Ответ API не является корректным JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("Неверный тип данных \"{field}\": ожидался {expected}, получен {actual}.")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Отсутствует ключ \"{key}\".")]
    MissingKey { key: &'static str },

    #[error("Неопределенный статус: {status}.")]
    UnknownStatus { status: String },

    /// Chat transport failure; never escapes the polling loop
    #[error("Сбой при отправке сообщения: {reason}")]
    Delivery { reason: String },
}

/// Identity of an error for alert de-duplication.
///
/// Two errors with equal fingerprints are reported to the chat only once in a row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorFingerprint {
    pub kind: &'static str,
    pub key: String,
}

impl NotifierError {
    pub fn kind(&self) -> &'static str {
        match self {
            NotifierError::Transport { .. } => "transport_failure",
            NotifierError::EndpointUnavailable { .. } => "endpoint_unavailable",
            NotifierError::InvalidJson { .. } => "invalid_json",
            NotifierError::TypeMismatch { .. } => "type_mismatch",
            NotifierError::MissingKey { .. } => "missing_key",
            NotifierError::UnknownStatus { .. } => "unknown_status",
            NotifierError::Delivery { .. } => "delivery_failure",
        }
    }

    pub fn fingerprint(&self) -> ErrorFingerprint {
        let key = match self {
            NotifierError::Transport { reason }
            | NotifierError::InvalidJson { reason }
            | NotifierError::Delivery { reason } => reason.clone(),
            NotifierError::EndpointUnavailable {
                endpoint, status, ..
            } => format!("{endpoint}:{status}"),
            NotifierError::TypeMismatch { field, actual, .. } => format!("{field}:{actual}"),
            NotifierError::MissingKey { key } => (*key).to_string(),
            NotifierError::UnknownStatus { status } => status.clone(),
        };

        ErrorFingerprint {
            kind: self.kind(),
            key,
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
