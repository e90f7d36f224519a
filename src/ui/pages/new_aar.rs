//! New AAR form page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::core::aar_form::{self, AarForm};
use crate::core::query_cache::keys;
use crate::core::validation::{Field, FieldErrors, SubmitError};
use crate::core::{Event, Notification, visible_events};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ErrorMessage, SelectField, TextAreaField};
use crate::ui::notifications::use_notifications;
use crate::ui::query::{use_query, use_query_client};

const ITEMS_HINT: &str = "One item per line";

#[component]
pub fn NewAarPage() -> impl IntoView {
    let auth = use_auth_context();
    let queries = use_query_client();
    let notifications = use_notifications();
    let navigate = use_navigate();
    let events = use_query::<Vec<Event>, _, _>(keys::EVENTS, |api| async move {
        api.list_events().await
    });

    let form = RwSignal::new(AarForm::new());
    let errors = RwSignal::new(FieldErrors::new());
    let saving = RwSignal::new(false);
    let banner = RwSignal::new(None::<String>);

    let event_options = Signal::derive(move || {
        visible_events(events.data.get().unwrap_or_default())
            .into_iter()
            .map(|e| (e.id.to_string(), format!("{} ({})", e.title, e.start_date)))
            .collect::<Vec<_>>()
    });

    let field_error = move |field: Field| Signal::derive(move || errors.with(|e| e.message(field)));

    let update = move |apply: fn(&mut AarForm, String)| {
        Callback::new(move |value: String| {
            form.update(|f| apply(f, value));
            errors.update(|e| *e = FieldErrors::new());
        })
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(user) = auth.state.with_untracked(|s| s.user().cloned()) else {
            return;
        };
        let current = form.get_untracked();
        if let Err(field_errors) = current.validate(user.unit_id) {
            errors.set(field_errors);
            return;
        }

        saving.set(true);
        banner.set(None);
        let api = queries.api();
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = aar_form::submit(&api, &current, user.unit_id).await;
            saving.set(false);
            match result {
                Ok(_) => {
                    queries.invalidate(keys::AARS);
                    notifications.notify(Notification::success("AAR saved", "Your review was recorded."));
                    navigate("/aars", Default::default());
                }
                Err(SubmitError::Invalid(field_errors)) => errors.set(field_errors),
                Err(SubmitError::Remote(e)) => {
                    leptos::logging::warn!("saving AAR failed: {}", e);
                    banner.set(Some(e.user_message()));
                    notifications.notify(Notification::from_api_error("Could not save AAR", &e));
                }
            }
        });
    };

    view! {
        <form on:submit=on_submit class="card p-6 space-y-5 max-w-2xl">
            <h2 class="title-lg">"New after-action review"</h2>

            <ErrorMessage error=banner/>

            <SelectField
                label="Event"
                required=true
                value=Signal::derive(move || form.with(|f| f.event_id.clone()))
                on_change=update(|f, v| f.event_id = v)
                options=event_options
                error=field_error(Field::Event)
            />
            <TextAreaField
                label="Sustain"
                placeholder=ITEMS_HINT
                rows=4
                value=Signal::derive(move || form.with(|f| f.sustain.clone()))
                on_input=update(|f, v| f.sustain = v)
            />
            <TextAreaField
                label="Improve"
                placeholder=ITEMS_HINT
                rows=4
                value=Signal::derive(move || form.with(|f| f.improve.clone()))
                on_input=update(|f, v| f.improve = v)
            />
            <TextAreaField
                label="Action items"
                placeholder=ITEMS_HINT
                rows=4
                value=Signal::derive(move || form.with(|f| f.action.clone()))
                on_input=update(|f, v| f.action = v)
                error=field_error(Field::Items)
            />

            <div class="flex items-center justify-between">
                <span class="text-sm text-theme-muted">
                    {move || format!("{} item(s)", form.with(AarForm::item_count))}
                </span>
                <button type="submit" class="btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save AAR" }}
                </button>
            </div>
        </form>
    }
}
