//! Dashboard page component
//!
//! Greets the signed-in user and summarizes upcoming training and AARs.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::query_cache::keys;
use crate::core::{Aar, Event, TrainingStep, visible_events};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{EmptyState, QueryError};
use crate::ui::icon::{Icon, icons};
use crate::ui::query::use_query;

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="card p-5">
            <div class="text-sm text-theme-muted">{label}</div>
            <div class="mt-1 text-3xl font-bold text-theme-primary">{move || value.get()}</div>
        </div>
    }
}

/// Dashboard page component
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth_context();
    let events = use_query::<Vec<Event>, _, _>(keys::EVENTS, |api| async move {
        api.list_events().await
    });
    let aars = use_query::<Vec<Aar>, _, _>(keys::AARS, |api| async move { api.list_aars().await });

    let upcoming = Memo::new(move |_| {
        let today = chrono::Utc::now().date_naive();
        events
            .data
            .get()
            .map(|list| {
                visible_events(list)
                    .into_iter()
                    .filter(|e| e.is_upcoming(today))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    });

    let count = |loading: RwSignal<bool>, n: Signal<Option<usize>>| {
        Signal::derive(move || match n.get() {
            Some(n) => n.to_string(),
            None if loading.get() => "...".to_string(),
            None => "-".to_string(),
        })
    };
    let upcoming_count = count(
        events.loading,
        Signal::derive(move || events.data.with(|d| d.as_ref().map(|_| upcoming.with(Vec::len)))),
    );
    let aar_count = count(
        aars.loading,
        Signal::derive(move || aars.data.with(|d| d.as_ref().map(Vec::len))),
    );

    view! {
        <div class="space-y-8">
            {move || auth.user().map(|user| view! {
                <div>
                    <h2 class="text-2xl font-bold text-theme-primary">
                        "Welcome, " {user.display_name()}
                    </h2>
                    <p class="text-theme-secondary">{user.role.label()}</p>
                </div>
            })}

            <div class="grid grid-cols-1 sm:grid-cols-2 gap-4">
                <StatCard label="Upcoming events" value=upcoming_count/>
                <StatCard label="After-action reviews" value=aar_count/>
            </div>

            <QueryError error=events.error/>

            <section class="card">
                <div class="card-header">
                    <h3 class="title-lg">"Next up"</h3>
                    <A href="/events" attr:class="flex items-center text-sm text-theme-accent hover:opacity-80">
                        "All events"
                        <Icon name=icons::CHEVRON_RIGHT class="w-4 h-4 ml-1"/>
                    </A>
                </div>
                {move || {
                    let list = upcoming.get();
                    if list.is_empty() {
                        view! { <EmptyState message="No upcoming training events"/> }.into_any()
                    } else {
                        view! {
                            <ul class="divide-y divide-theme">
                                {list.into_iter().take(5).map(|event| view! {
                                    <li class="px-6 py-3 flex items-center justify-between">
                                        <div>
                                            <div class="font-medium text-theme-primary">{event.title.clone()}</div>
                                            <div class="text-xs text-theme-muted">
                                                {step_label(event.step)}
                                            </div>
                                        </div>
                                        <div class="text-sm text-theme-secondary">{event.date_range()}</div>
                                    </li>
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                }}
            </section>
        </div>
    }
}

/// "Step 3: Recon the Site"
pub(crate) fn step_label(step: TrainingStep) -> String {
    format!("Step {}: {}", step.number(), step.title())
}
