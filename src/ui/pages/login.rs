//! Login page component
//!
//! A standalone page for user login, redirects to the dashboard on success.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::core::session::HOME_ROUTE;
use crate::ui::auth::{LoginForm, use_auth_context};

/// Frame shared by the signed-out pages
#[component]
pub(super) fn AuthPageShell(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-theme-primary flex flex-col">
            <header class="border-b border-theme">
                <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                    <div class="flex items-center h-16 gap-3">
                        <div class="w-8 h-8 bg-accent-primary rounded-lg flex items-center justify-center">
                            <svg class="w-5 h-5 text-white" fill="none" viewBox="0 0 24 24" stroke="currentColor">
                                <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2"
                                      d="M9 5H7a2 2 0 00-2 2v12a2 2 0 002 2h10a2 2 0 002-2V7a2 2 0 00-2-2h-2M9 5a2 2 0 002 2h2a2 2 0 002-2M9 5a2 2 0 012-2h2a2 2 0 012 2m-6 9l2 2 4-4" />
                            </svg>
                        </div>
                        <span class="text-xl font-bold text-theme-primary">"AfterAction"</span>
                    </div>
                </div>
            </header>

            <main class="flex-1 flex items-center justify-center p-4">
                <div class="w-full max-w-md">
                    {children()}
                </div>
            </main>
        </div>
    }
}

/// Login page component
#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();

    // Redirect if already authenticated
    Effect::new(move |_| {
        if auth.is_authenticated() {
            navigate(HOME_ROUTE, Default::default());
        }
    });

    view! {
        <AuthPageShell>
            <LoginForm/>
        </AuthPageShell>
    }
}
