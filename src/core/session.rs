//! Session lifecycle shared by the auth context

use super::api::{ApiClient, ApiError, Transport};
use super::models::User;

/// Route unauthenticated users are sent to
pub const LOGIN_ROUTE: &str = "/login";

/// Route users land on after signing in
pub const HOME_ROUTE: &str = "/dashboard";

/// Authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AuthState {
    /// Session is being restored
    #[default]
    Loading,
    /// User is not authenticated
    Unauthenticated,
    /// User is authenticated
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Restore the session from the backend cookie.
///
/// Any failure, not only a 401, leaves the user signed out; the error is
/// returned alongside so the caller can log unexpected ones.
pub async fn restore<T: Transport>(client: &ApiClient<T>) -> (AuthState, Option<ApiError>) {
    match client.current_user().await {
        Ok(user) => (AuthState::Authenticated(user), None),
        Err(e) if e.is_unauthorized() => (AuthState::Unauthenticated, None),
        Err(e) => (AuthState::Unauthenticated, Some(e)),
    }
}

/// What the UI must do after a logout attempt
#[derive(Debug, Clone, PartialEq)]
pub struct LogoutOutcome {
    pub state: AuthState,
    pub redirect: &'static str,
    /// Failure of the remote call; local state is cleared regardless
    pub remote_error: Option<ApiError>,
}

pub async fn logout<T: Transport>(client: &ApiClient<T>) -> LogoutOutcome {
    LogoutOutcome {
        state: AuthState::Unauthenticated,
        redirect: LOGIN_ROUTE,
        remote_error: client.logout().await.err(),
    }
}
