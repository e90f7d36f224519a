//! Auth context for managing user authentication state
//!
//! This module provides a reactive authentication context that:
//! - Restores the session from the backend cookie on startup
//! - Handles login, logout and registration flows
//! - Keeps the cached current user in step with the session

use leptos::prelude::*;

use crate::core::query_cache::keys;
use crate::core::registration::{self, RegistrationForm};
use crate::core::session::{self, AuthState};
use crate::core::validation::SubmitError;
use crate::core::{Notification, User};
use crate::ui::notifications::{NotificationManager, use_notifications};
use crate::ui::query::{QueryClient, use_query_client};

/// Banner shown when the backend rejects a registration
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";

/// Auth context providing authentication state and actions
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// Current authentication state
    pub state: RwSignal<AuthState>,
    /// Loading state for auth operations
    pub loading: RwSignal<bool>,
    /// Error message from last operation
    pub error: RwSignal<Option<String>>,
    queries: QueryClient,
    notifications: NotificationManager,
}

impl AuthContext {
    /// Check if user is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.state.with(AuthState::is_authenticated)
    }

    /// Get current user (if authenticated)
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn is_restoring(&self) -> bool {
        self.state.with(|s| matches!(s, AuthState::Loading))
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }

    fn sign_in(&self, user: User) {
        self.queries.set(keys::CURRENT_USER, &user);
        self.state.set(AuthState::Authenticated(user));
    }

    /// `POST /api/auth/login`; shows a toast and returns false on failure
    pub async fn login(self, username: String, password: String) -> bool {
        self.loading.set(true);
        self.error.set(None);

        let result = self.queries.api().login(username.trim(), &password).await;
        self.loading.set(false);

        match result {
            Ok(user) => {
                self.sign_in(user);
                true
            }
            Err(e) => {
                leptos::logging::warn!("login failed: {}", e);
                self.error.set(Some(e.user_message()));
                self.notifications
                    .notify(Notification::from_api_error("Sign in failed", &e));
                false
            }
        }
    }

    /// Create the account and sign in as the new user
    pub async fn register(self, form: RegistrationForm) -> bool {
        self.loading.set(true);
        self.error.set(None);

        let result = registration::submit(&self.queries.api(), &form).await;
        self.loading.set(false);

        match result {
            Ok(user) => {
                self.notifications
                    .success("Welcome", format!("Signed in as {}", user.username));
                self.sign_in(user);
                true
            }
            Err(SubmitError::Invalid(errors)) => {
                self.error.set(errors.messages().into_iter().next());
                false
            }
            Err(SubmitError::Remote(e)) => {
                leptos::logging::warn!("registration failed: {}", e);
                self.error.set(Some(REGISTRATION_FAILED.to_string()));
                self.notifications
                    .notify(Notification::from_api_error("Registration failed", &e));
                false
            }
        }
    }

    /// Clear the session locally whatever the backend answers.
    /// Returns the route to navigate to.
    pub async fn logout(self) -> &'static str {
        let outcome = session::logout(&self.queries.api()).await;
        if let Some(e) = outcome.remote_error {
            leptos::logging::warn!("logout request failed: {}", e);
        }
        self.state.set(outcome.state);
        self.queries.clear();
        self.error.set(None);
        outcome.redirect
    }
}

/// Provide auth context to the component tree
pub fn provide_auth_context() -> AuthContext {
    // Loading on both server and client so hydration matches
    let ctx = AuthContext {
        state: RwSignal::new(AuthState::Loading),
        loading: RwSignal::new(false),
        error: RwSignal::new(None::<String>),
        queries: use_query_client(),
        notifications: use_notifications(),
    };

    // Restore the session once hydrated
    Effect::new(move |_| {
        leptos::task::spawn_local(async move {
            let (state, error) = session::restore(&ctx.queries.api()).await;
            if let Some(e) = error {
                leptos::logging::warn!("could not restore session: {}", e);
            }
            if let Some(user) = state.user() {
                ctx.queries.set(keys::CURRENT_USER, user);
            }
            ctx.state.set(state);
        });
    });

    provide_context(ctx);
    ctx
}

/// Get auth context from the component tree
pub fn use_auth_context() -> AuthContext {
    expect_context::<AuthContext>()
}
