//! Register form component
//!
//! With a referral code the unit field is resolved from the code and locked;
//! otherwise it starts at the default unit and stays editable.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use super::context::use_auth_context;
use crate::core::registration::{self, RegistrationForm};
use crate::core::validation::{Field, FieldErrors};
use crate::core::{Notification, Role};
use crate::ui::common::{FormField, SelectField, TextAreaField};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::query::use_query_client;

/// Register form component
#[component]
pub fn RegisterForm(
    /// Referral code from the route, if any
    #[prop(default = None)]
    referral: Option<String>,
    /// Callback when registration is successful
    #[prop(optional, into)]
    on_success: Option<Callback<()>>,
) -> impl IntoView {
    let auth = use_auth_context();
    let queries = use_query_client();
    let notifications = use_notifications();

    let form = RwSignal::new(RegistrationForm::new());
    let errors = RwSignal::new(FieldErrors::new());
    let resolving = RwSignal::new(referral.is_some());

    // Resolve the referral once, in the browser
    Effect::new(move |_| {
        let Some(code) = referral.clone() else {
            return;
        };
        let api = queries.api();
        spawn_local(async move {
            let mut draft = RegistrationForm::new();
            match registration::apply_referral(&api, &mut draft, &code).await {
                Ok(unit) => form.update(|f| f.lock_to_unit(unit)),
                Err(e) => {
                    leptos::logging::warn!("referral {} did not resolve: {}", code, e);
                    notifications.notify(Notification::warning(
                        "Referral code not recognised",
                        "Enter your unit ID manually.",
                    ));
                }
            }
            resolving.set(false);
        });
    });

    let field_error = move |field: Field| Signal::derive(move || errors.with(|e| e.message(field)));

    let update = move |apply: fn(&mut RegistrationForm, String)| {
        Callback::new(move |value: String| {
            form.update(|f| apply(f, value));
            errors.update(|e| *e = FieldErrors::new());
        })
    };

    let role_options: Vec<(String, String)> = Role::ALL
        .iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        auth.clear_error();

        let current = form.get_untracked();
        if let Err(field_errors) = current.validate() {
            errors.set(field_errors);
            return;
        }

        spawn_local(async move {
            if auth.register(current).await {
                if let Some(callback) = on_success {
                    callback.run(());
                }
            }
        });
    };

    view! {
        <div class="w-full max-w-md mx-auto bg-theme-primary rounded-xl shadow-lg p-6 border border-theme">
            <form on:submit=on_submit class="space-y-4">
                <div class="text-center">
                    <h2 class="text-2xl font-bold text-theme-primary">"Create Account"</h2>
                    <p class="mt-2 text-sm text-theme-secondary">
                        "Join your unit to plan training and record AARs"
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

                {move || {
                    form.with(|f| f.referral_unit().cloned()).map(|unit| {
                        view! {
                            <div class="p-3 bg-blue-500/10 border border-blue-500/30 rounded-lg text-sm text-theme-primary">
                                "Joining "
                                <strong>{unit.name}</strong>
                                " (" {unit.unit_level.label()} ")"
                            </div>
                        }
                    })
                }}

                <FormField
                    label="Username"
                    required=true
                    placeholder="jsmith"
                    value=Signal::derive(move || form.with(|f| f.username.clone()))
                    on_input=update(|f, v| f.username = v)
                    error=field_error(Field::Username)
                />
                <FormField
                    label="Password"
                    required=true
                    input_type="password"
                    value=Signal::derive(move || form.with(|f| f.password.clone()))
                    on_input=update(|f, v| f.password = v)
                    error=field_error(Field::Password)
                />
                <div class="grid grid-cols-2 gap-3">
                    <FormField
                        label="Name"
                        required=true
                        placeholder="Smith"
                        value=Signal::derive(move || form.with(|f| f.name.clone()))
                        on_input=update(|f, v| f.name = v)
                        error=field_error(Field::Name)
                    />
                    <FormField
                        label="Rank"
                        required=true
                        placeholder="SGT"
                        value=Signal::derive(move || form.with(|f| f.rank.clone()))
                        on_input=update(|f, v| f.rank = v)
                        error=field_error(Field::Rank)
                    />
                </div>
                <SelectField
                    label="Role"
                    required=true
                    value=Signal::derive(move || form.with(|f| f.role.clone()))
                    on_change=update(|f, v| f.role = v)
                    options=role_options
                    error=field_error(Field::Role)
                />
                <FormField
                    label="Unit ID"
                    required=true
                    value=Signal::derive(move || form.with(|f| f.unit_id().to_string()))
                    on_input=update(|f, v| {
                        f.set_unit_id(v);
                    })
                    disabled=Signal::derive(move || resolving.get() || form.with(RegistrationForm::is_unit_locked))
                    error=field_error(Field::UnitId)
                />
                <TextAreaField
                    label="Bio"
                    placeholder="Optional"
                    value=Signal::derive(move || form.with(|f| f.bio.clone()))
                    on_input=update(|f, v| f.bio = v)
                />

                <button
                    type="submit"
                    class="w-full py-2.5 px-4 bg-accent-primary hover:bg-accent-primary-hover
                           text-white font-medium rounded-lg
                           disabled:opacity-50 disabled:cursor-not-allowed
                           transition-colors"
                    disabled=move || auth.loading.get() || resolving.get()
                >
                    {move || {
                        if auth.loading.get() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4 text-white" />
                                    "Creating account..."
                                </span>
                            }.into_any()
                        } else {
                            view! { <span class="block">"Create Account"</span> }.into_any()
                        }
                    }}
                </button>

                <div class="text-center text-sm text-theme-secondary">
                    "Already have an account? "
                    <A href="/login" attr:class="text-accent-primary hover:text-accent-primary-hover font-medium">
                        "Sign in"
                    </A>
                </div>
            </form>
        </div>
    }
}
