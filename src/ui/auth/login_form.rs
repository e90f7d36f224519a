//! Login form component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::validation::{Field, validate_required};
use crate::ui::icon::{Icon, icons};

/// Login form component
#[component]
pub fn LoginForm(
    /// Callback when login is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();

    // Form state
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);

    // Form validation
    let username_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let validate_username = move || match validate_required(Field::Username, &username.get()) {
        Ok(()) => {
            username_error.set(None);
            true
        }
        Err(e) => {
            username_error.set(Some(e.to_string()));
            false
        }
    };

    let validate_password = move || match validate_required(Field::Password, &password.get()) {
        Ok(()) => {
            password_error.set(None);
            true
        }
        Err(e) => {
            password_error.set(Some(e.to_string()));
            false
        }
    };

    // Handle form submission
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        auth.clear_error();

        let username_valid = validate_username();
        let password_valid = validate_password();

        if !username_valid || !password_valid {
            return;
        }

        let username_val = username.get();
        let password_val = password.get();

        spawn_local(async move {
            if auth.login(username_val, password_val).await {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-6">
                // Header
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">
                        "Sign In"
                    </h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Access your unit's events and after-action reviews"
                    </p>
                </div>

                // Global error message
                {move || {
                    auth.error.get().map(|error| {
                        view! {
                            <div class="p-3 bg-red-100 dark:bg-red-900/30 border border-red-300 dark:border-red-700 rounded-lg">
                                <p class="text-sm text-red-700 dark:text-red-300">{error}</p>
                            </div>
                        }
                    })
                }}

                // Username field
                <div>
                    <label for="username" class="block text-sm font-medium text-theme-primary mb-1">
                        "Username"
                    </label>
                    <input
                        type="text"
                        id="username"
                        name="username"
                        autocomplete="username"
                        placeholder="Your username"
                        class="w-full px-3 py-2 bg-theme-secondary border border-theme rounded-lg
                               text-theme-primary placeholder-theme-tertiary
                               focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                               transition-colors"
                        class:border-red-500=move || username_error.get().is_some()
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            username.set(event_target_value(&ev));
                            username_error.set(None);
                        }
                        on:blur=move |_| { validate_username(); }
                    />
                    {move || {
                        username_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                </div>

                // Password field
                <div>
                    <label for="password" class="block text-sm font-medium text-theme-primary mb-1">
                        "Password"
                    </label>
                    <div class="relative">
                        <input
                            type=move || if show_password.get() { "text" } else { "password" }
                            id="password"
                            name="password"
                            autocomplete="current-password"
                            placeholder="Enter your password"
                            class="w-full px-3 py-2 pr-10 bg-theme-secondary border border-theme rounded-lg
                                   text-theme-primary placeholder-theme-tertiary
                                   focus:outline-none focus:ring-2 focus:ring-accent-primary focus:border-transparent
                                   transition-colors"
                            class:border-red-500=move || password_error.get().is_some()
                            prop:value=move || password.get()
                            on:input=move |ev| {
                                password.set(event_target_value(&ev));
                                password_error.set(None);
                            }
                            on:blur=move |_| { validate_password(); }
                        />
                        <button
                            type="button"
                            class="absolute inset-y-0 right-0 pr-3 flex items-center text-theme-tertiary hover:text-theme-secondary"
                            on:click=move |_| show_password.update(|v| *v = !*v)
                        >
                            {move || {
                                if show_password.get() {
                                    view! {
                                        <Icon name=icons::EYE_CLOSED class="h-5 w-5" />
                                    }.into_any()
                                } else {
                                    view! {
                                        <Icon name=icons::EYE class="h-5 w-5" />
                                    }.into_any()
                                }
                            }}
                        </button>
                    </div>
                    {move || {
                        password_error.get().map(|error| {
                            view! {
                                <p class="mt-1 text-sm text-red-500">{error}</p>
                            }
                        })
                    }}
                </div>

                // Submit button
                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           focus:outline-none focus:ring-2 focus:ring-offset-2 focus:ring-accent-primary
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=move || auth.loading.get()
                >
                    {move || {
                        if auth.loading.get() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                    "Signing in..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">"Sign In"</span> }.into_any()
                        }
                    }}
                </button>

                <div class="text-center text-sm text-theme-secondary">
                    "Don't have an account? "
                    <A href="/register" attr:class="text-accent-primary hover:text-accent-primary-hover font-medium">
                        "Register"
                    </A>
                </div>
            </form>
        </div>
    }
}
