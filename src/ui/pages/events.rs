//! Events admin page
//!
//! Lists training events. Deleting asks for confirmation, shows a spinner on
//! that row only and removes the row once the backend confirms.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::dashboard::step_label;
use crate::core::events::EventsTable;
use crate::core::query_cache::keys;
use crate::core::{Event, EventId};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{ConfirmDialog, EmptyState, InlineSpinner, LoadingSpinner, QueryError};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::query::{use_query, use_query_client};

#[component]
pub fn EventsAdminPage() -> impl IntoView {
    let auth = use_auth_context();
    let queries = use_query_client();
    let notifications = use_notifications();
    let events = use_query::<Vec<Event>, _, _>(keys::EVENTS, |api| async move {
        api.list_events().await
    });

    let table = RwSignal::new(EventsTable::default());
    let pending_delete = RwSignal::new(None::<(EventId, String)>);
    let can_manage = Memo::new(move |_| auth.user().is_some_and(|u| u.role.can_manage_events()));

    // Follow the cache only while it is fresh so deleted rows stay gone
    // until the refetch lands
    Effect::new(move |_| {
        let fresh = events.fresh.get();
        if fresh.is_some() {
            table.update(|t| {
                t.sync(fresh);
            });
        }
    });

    let delete = move |id: EventId| {
        if !table.try_update(|t| t.begin_delete(id)).unwrap_or(false) {
            return;
        }
        let api = queries.api();
        spawn_local(async move {
            let result = api.delete_event(id).await;
            if let Err(e) = &result {
                leptos::logging::warn!("delete of event {} failed: {}", id, e);
            }
            if let Some(outcome) = table.try_update(|t| t.finish_delete(id, &result)) {
                notifications.notify(outcome.notification);
                if outcome.invalidate {
                    queries.invalidate(keys::EVENTS);
                }
            }
        });
    };

    let on_confirm = Callback::new(move |_| {
        if let Some((id, _)) = pending_delete.get_untracked() {
            delete(id);
        }
    });
    let on_cancel = Callback::new(move |_| pending_delete.set(None));

    view! {
        <div class="space-y-6">
            <QueryError error=events.error/>

            <section class="card">
                <div class="card-header">
                    <h3 class="title-lg">"Training events"</h3>
                </div>
                {move || {
                    if events.loading.get() && table.with(EventsTable::is_empty) {
                        return view! { <LoadingSpinner/> }.into_any();
                    }
                    if table.with(EventsTable::is_empty) {
                        return view! { <EmptyState message="No events scheduled"/> }.into_any();
                    }
                    view! {
                        <table class="w-full text-sm">
                            <thead class="text-left text-theme-muted">
                                <tr>
                                    <th class="px-6 py-3">"Title"</th>
                                    <th class="px-6 py-3">"Step"</th>
                                    <th class="px-6 py-3">"Dates"</th>
                                    <th class="px-6 py-3">"Location"</th>
                                    <th class="px-6 py-3"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y divide-theme">
                                <For
                                    each=move || table.with(|t| t.rows().to_vec())
                                    key=|event| event.id
                                    children=move |event| {
                                        let id = event.id;
                                        let dates = event.date_range();
                                        let step = step_label(event.step);
                                        let title = event.title.clone();
                                        let deleting = Memo::new(move |_| table.with(|t| t.is_deleting(id)));
                                        view! {
                                            <tr class:opacity-50=move || deleting.get()>
                                                <td class="px-6 py-3 font-medium text-theme-primary">{event.title}</td>
                                                <td class="px-6 py-3 text-theme-secondary">{step}</td>
                                                <td class="px-6 py-3 text-theme-secondary">{dates}</td>
                                                <td class="px-6 py-3 text-theme-secondary">{event.location}</td>
                                                <td class="px-6 py-3 text-right">
                                                    {move || {
                                                        if !can_manage.get() {
                                                            return ().into_any();
                                                        }
                                                        if deleting.get() {
                                                            return view! { <InlineSpinner/> }.into_any();
                                                        }
                                                        let title = title.clone();
                                                        view! {
                                                            <button
                                                                class="btn-icon"
                                                                title="Delete event"
                                                                aria-label="Delete event"
                                                                on:click=move |_| pending_delete.set(Some((id, title.clone())))
                                                            >
                                                                <Icon name=icons::TRASH class="w-4 h-4"/>
                                                            </button>
                                                        }.into_any()
                                                    }}
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    }.into_any()
                }}
            </section>

            <ConfirmDialog
                title="Delete event"
                message=Signal::derive(move || {
                    pending_delete
                        .get()
                        .map(|(_, title)| format!("Delete \"{}\"? This cannot be undone.", title))
                        .unwrap_or_default()
                })
                is_open=Signal::derive(move || pending_delete.get().is_some())
                on_confirm=on_confirm
                on_cancel=on_cancel
                confirm_text="Delete"
                is_destructive=true
            />
        </div>
    }
}
