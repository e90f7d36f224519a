//! Banners for page-level errors and empty states

use crate::core::api::ApiError;
use crate::ui::{Icon, icons};
use leptos::prelude::*;

/// Error message component
/// Displays an error message with an alert icon
#[component]
pub fn ErrorMessage(
    /// Error signal - shows message when Some, hidden when None
    #[prop(into)]
    error: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some()>
            <div class="error-message" role="alert">
                <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                <span>{move || error.get().unwrap_or_default()}</span>
            </div>
        </Show>
    }
}

/// Banner for a failed query
#[component]
pub fn QueryError(error: RwSignal<Option<ApiError>>) -> impl IntoView {
    view! { <ErrorMessage error=Signal::derive(move || error.get().map(|e| e.user_message())) /> }
}

/// Placeholder for an empty list
#[component]
pub fn EmptyState(
    /// Text shown in place of the missing content
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-10 text-sm text-theme-muted">
            <Icon name=icons::INFORMATION_CIRCLE class="icon-text"/>
            <span>{message}</span>
        </div>
    }
}
