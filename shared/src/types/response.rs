//! API response types and wrappers

use serde::{Deserialize, Serialize};

/// Minimal success body: `{ "status": "sent" }`, `{ "status": "success" }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

/// Error body returned by every failing endpoint
///
/// `detail` carries the underlying cause for gateway failures;
/// `attempts_left` is present only on a wrong-code response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,

    /// Underlying cause, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Remaining wrong guesses before lockout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_left: Option<u32>,
}

impl ErrorBody {
    /// Create an error body with just a message
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
            attempts_left: None,
        }
    }

    /// Attach an underlying cause
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Attach the remaining attempt count
    pub fn with_attempts_left(mut self, attempts_left: u32) -> Self {
        self.attempts_left = Some(attempts_left);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_serialization_skips_empty_fields() {
        let body = ErrorBody::new("Incorrect code. Try again.").with_attempts_left(1);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "Incorrect code. Try again.");
        assert_eq!(json["attempts_left"], 1);
        assert!(json.get("detail").is_none());
    }

    #[test]
    fn test_status_body() {
        let json = serde_json::to_value(StatusBody::new("sent")).unwrap();
        assert_eq!(json["status"], "sent");
    }
}
