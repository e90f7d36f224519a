//! Toast notification payloads

use super::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Success,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Error,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(6000),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Warning,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(5000),
        }
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Info,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    /// Error toast whose body is the backend's message
    pub fn from_api_error(title: impl Into<String>, error: &ApiError) -> Self {
        Self::error(title, error.user_message())
    }

    pub fn is_error(&self) -> bool {
        self.notification_type == NotificationType::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_type_and_dismiss() {
        assert_eq!(
            Notification::success("Saved", "").notification_type,
            NotificationType::Success
        );
        assert_eq!(Notification::warning("w", "").auto_dismiss_ms, Some(5000));
        assert!(Notification::error("e", "").is_error());
        assert!(!Notification::info("i", "").is_error());
    }

    #[test]
    fn test_from_api_error_uses_backend_message() {
        let err = ApiError::from_response(500, r#"{"message":"Database unavailable"}"#);
        let toast = Notification::from_api_error("Delete failed", &err);
        assert!(toast.is_error());
        assert_eq!(toast.title, "Delete failed");
        assert_eq!(toast.message, "Database unavailable");
    }
}
