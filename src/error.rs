//! Error types for backend requests

use crate::model::GENERIC_ERROR_MESSAGE;
use thiserror::Error;

/// Failure of a single backend request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response carrying a message from the backend
    #[error("backend error ({status}): {msg}")]
    Backend { status: u16, msg: String },

    /// Non-2xx response without a usable message
    #[error("unexpected status {0}")]
    Status(u16),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text for the error notification: the backend message verbatim when
    /// there is one, the generic message otherwise
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { msg, .. } => msg.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Map a non-success status and its body to an [`ApiError`]
pub fn map_status_error(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["msg", "message"]
                .iter()
                .find_map(|field| value.get(field).and_then(|m| m.as_str()).map(str::to_string))
        })
        .filter(|msg| !msg.trim().is_empty());

    match message {
        Some(msg) => ApiError::Backend { status, msg },
        None => ApiError::Status(status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_backend_error() {
        let body = r#"{"msg": "El juego ya está prestado"}"#;
        let error = map_status_error(409, body.as_bytes());
        assert_eq!(
            error,
            ApiError::Backend {
                status: 409,
                msg: "El juego ya está prestado".to_string()
            }
        );
        assert_eq!(error.user_message(), "El juego ya está prestado");
    }

    #[test]
    fn test_spring_style_message_field() {
        let error = map_status_error(500, br#"{"status": 500, "message": "Boom"}"#);
        assert_eq!(error.user_message(), "Boom");
    }

    #[test]
    fn test_unstructured_errors_use_generic_message() {
        assert_eq!(map_status_error(502, b"<html>Bad Gateway</html>"), ApiError::Status(502));
        assert_eq!(map_status_error(500, br#"{"msg": ""}"#), ApiError::Status(500));
        assert_eq!(
            ApiError::Transport("connection refused".to_string()).user_message(),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(ApiError::Status(404).user_message(), GENERIC_ERROR_MESSAGE);
    }
}
