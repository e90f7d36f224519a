//! Shell for signed-in pages

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::core::session::{AuthState, LOGIN_ROUTE};
use crate::ui::auth::use_auth_context;
use crate::ui::common::LoadingSpinner;
use crate::ui::header::Header;
use crate::ui::sidebar::Sidebar;

/// Sidebar and header around the nested route. Sends signed-out users to
/// the login page once the session restore has finished.
#[component]
pub fn AppLayout() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    let signed_in = Memo::new(move |_| auth.is_authenticated());

    Effect::new(move |_| {
        if auth.state.with(|s| matches!(s, AuthState::Unauthenticated)) {
            navigate(
                LOGIN_ROUTE,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || signed_in.get()
            fallback=|| view! {
                <div class="min-h-screen flex items-center justify-center bg-theme-primary">
                    <LoadingSpinner message="Checking your session...".to_string()/>
                </div>
            }
        >
            <div class="min-h-screen flex bg-theme-primary">
                <Sidebar/>
                <div class="flex-1 min-w-0">
                    <Header/>
                    <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                        <Outlet/>
                    </main>
                </div>
            </div>
        </Show>
    }
}
