use serde::Deserialize;
use thiserror::Error;

/// Failure of a single REST call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Backend answered with a non-2xx status
    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    /// Request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Error body returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Build an error from a non-2xx response, keeping the backend's `message`
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message(status).to_string());

        ApiError::Status { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Text suitable for a toast or banner
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            ApiError::Decode(_) => "The server sent an unexpected response.".to_string(),
        }
    }
}

fn default_message(status: u16) -> &'static str {
    match status {
        400 => "The request was invalid",
        401 => "You need to sign in",
        403 => "You do not have permission to do that",
        404 => "Not found",
        409 => "That record already exists",
        500..=599 => "The server encountered an error",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_uses_backend_message() {
        let err = ApiError::from_response(409, r#"{"message":"Username already taken"}"#);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.user_message(), "Username already taken");
    }

    #[test]
    fn test_from_response_accepts_error_field() {
        let err = ApiError::from_response(400, r#"{"error":"Bad referral code"}"#);
        assert_eq!(err.user_message(), "Bad referral code");
    }

    #[test]
    fn test_from_response_falls_back_on_status_text() {
        let err = ApiError::from_response(401, "<html>nope</html>");
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message(), "You need to sign in");

        let err = ApiError::from_response(502, r#"{"message":"   "}"#);
        assert_eq!(err.user_message(), "The server encountered an error");
    }

    #[test]
    fn test_network_and_decode_messages() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "Network error. Please try again.");
        assert!(err.to_string().contains("connection refused"));

        let err = ApiError::Decode("missing field `id`".into());
        assert!(!err.is_not_found());
        assert_eq!(err.user_message(), "The server sent an unexpected response.");
    }
}
