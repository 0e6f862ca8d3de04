use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {timeout_seconds} seconds")]
    Timeout { timeout_seconds: u64 },

    #[error("Server error ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error payload the backend sends with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Server detail as display text. Request validation failures send a list
    /// instead of a string, which is rendered as compact JSON.
    pub fn detail_text(&self) -> Option<String> {
        match &self.detail {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(text)) => Some(text.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

impl AppError {
    /// Maps a non-2xx answer. A body that is not JSON at all (a proxy error
    /// page, say) never reached the backend's error handler and counts as an
    /// invalid response rather than a server rejection.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        tracing::error!("API error ({}): {}", status, body);

        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(value) => {
                let detail = serde_json::from_value::<ErrorBody>(value)
                    .ok()
                    .and_then(|parsed| parsed.detail_text());
                AppError::Server { status, detail }
            }
            Err(e) => AppError::InvalidResponse(format!("HTTP {} with non-JSON body: {}", status, e)),
        }
    }

    /// Whether the failure came from the network rather than from the server's answer.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Timeout { .. } | AppError::InvalidResponse(_)
        )
    }

    pub fn server_detail(&self) -> Option<&str> {
        match self {
            AppError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_is_taken_verbatim() {
        let err = AppError::from_response_body(400, r#"{"detail": "Doctor is not available at 14:30"}"#);
        assert_eq!(err.server_detail(), Some("Doctor is not available at 14:30"));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_json_without_detail() {
        let err = AppError::from_response_body(404, r#"{"message": "nope"}"#);
        assert_eq!(err, AppError::Server { status: 404, detail: None });

        let err = AppError::from_response_body(500, r#"["not", "an", "object"]"#);
        assert_eq!(err, AppError::Server { status: 500, detail: None });
    }

    #[test]
    fn test_non_json_error_body_is_invalid_response() {
        let err = AppError::from_response_body(502, "<html>Bad Gateway</html>");
        assert!(matches!(err, AppError::InvalidResponse(_)));
        assert!(err.is_transport());
        assert_eq!(err.server_detail(), None);

        let err = AppError::from_response_body(500, "");
        assert!(err.is_transport());
    }

    #[test]
    fn test_structured_detail_is_stringified() {
        let err = AppError::from_response_body(422, r#"{"detail": [{"loc": ["body", "doctor_id"]}]}"#);
        assert_eq!(err.server_detail(), Some(r#"[{"loc":["body","doctor_id"]}]"#));
    }

    #[test]
    fn test_transport_classification() {
        assert!(AppError::Timeout { timeout_seconds: 10 }.is_transport());
        assert!(AppError::Transport("connection refused".to_string()).is_transport());
        assert!(!AppError::ValidationError("x".to_string()).is_transport());
    }
}
