//! AARs page: analytics over every review plus the list itself

use leptos::prelude::*;
use leptos_router::components::A;
use std::collections::HashMap;

use crate::core::analytics::{DEFAULT_TOP_ISSUES, summarize};
use crate::core::query_cache::keys;
use crate::core::{Aar, Event, EventId};
use crate::ui::common::{EmptyState, LoadingSpinner, QueryError};
use crate::ui::icon::{Icon, icons};
use crate::ui::query::use_query;

#[component]
pub fn AarsPage() -> impl IntoView {
    let aars = use_query::<Vec<Aar>, _, _>(keys::AARS, |api| async move { api.list_aars().await });
    let events = use_query::<Vec<Event>, _, _>(keys::EVENTS, |api| async move {
        api.list_events().await
    });

    let summary = Memo::new(move |_| {
        aars.data
            .with(|list| list.as_deref().map(|l| summarize(l, DEFAULT_TOP_ISSUES)))
    });
    let event_titles = Memo::new(move |_| {
        events
            .data
            .get()
            .unwrap_or_default()
            .into_iter()
            .map(|e| (e.id, e.title))
            .collect::<HashMap<EventId, String>>()
    });
    let event_title = move |id: EventId| {
        event_titles.with(|t| t.get(&id).cloned().unwrap_or_else(|| format!("Event #{}", id)))
    };

    view! {
        <div class="space-y-6">
            <div class="flex justify-end">
                <A href="/aars/new" attr:class="btn-primary flex items-center gap-2">
                    <Icon name=icons::PLUS class="w-4 h-4"/>
                    "New AAR"
                </A>
            </div>

            <QueryError error=aars.error/>

            {move || summary.get().map(|s| {
                let items_per_aar = format!("{:.1}", s.items_per_aar());
                view! {
                    <div class="grid grid-cols-2 lg:grid-cols-5 gap-4">
                        <Stat label="AARs" value=s.total_aars.to_string()/>
                        <Stat label="Sustain" value=s.sustain_count.to_string()/>
                        <Stat label="Improve" value=s.improve_count.to_string()/>
                        <Stat label="Action items" value=s.action_count.to_string()/>
                        <Stat label="Items per AAR" value=items_per_aar/>
                    </div>

                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-4">
                        <section class="card">
                            <div class="card-header"><h3 class="title-lg">"Recurring issues"</h3></div>
                            {if s.top_issues.is_empty() {
                                view! { <EmptyState message="No improve items recorded"/> }.into_any()
                            } else {
                                view! {
                                    <ol class="px-6 py-3 space-y-2 list-decimal list-inside">
                                        {s.top_issues.into_iter().map(|issue| view! {
                                            <li class="text-theme-primary">
                                                {issue.text}
                                                <span class="ml-2 text-xs text-theme-muted">{format!("×{}", issue.count)}</span>
                                            </li>
                                        }).collect_view()}
                                    </ol>
                                }.into_any()
                            }}
                        </section>

                        <section class="card">
                            <div class="card-header"><h3 class="title-lg">"Reviews per event"</h3></div>
                            <ul class="px-6 py-3 space-y-1">
                                {s.per_event.into_iter().map(|(event_id, count)| view! {
                                    <li class="flex justify-between text-sm">
                                        <span class="text-theme-primary">{event_title(event_id)}</span>
                                        <span class="text-theme-muted">{count}</span>
                                    </li>
                                }).collect_view()}
                            </ul>
                        </section>
                    </div>
                }
            })}

            <section class="card">
                <div class="card-header"><h3 class="title-lg">"All reviews"</h3></div>
                {move || match aars.data.get() {
                    None if aars.loading.get() => view! { <LoadingSpinner/> }.into_any(),
                    None => ().into_any(),
                    Some(list) if list.is_empty() => view! { <EmptyState message="No AARs yet"/> }.into_any(),
                    Some(mut list) => {
                        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                        view! {
                            <ul class="divide-y divide-theme">
                                {list.into_iter().map(|aar| view! {
                                    <li class="px-6 py-4 space-y-2">
                                        <div class="flex justify-between">
                                            <span class="font-medium text-theme-primary">{event_title(aar.event_id)}</span>
                                            <span class="text-xs text-theme-muted">
                                                {aar.created_at.format("%Y-%m-%d").to_string()}
                                            </span>
                                        </div>
                                        <ItemList title="Sustain" items=aar.sustain_items/>
                                        <ItemList title="Improve" items=aar.improve_items/>
                                        <ItemList title="Action" items=aar.action_items/>
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

#[component]
fn Stat(label: &'static str, value: String) -> impl IntoView {
    view! {
        <div class="card p-4">
            <div class="text-xs text-theme-muted">{label}</div>
            <div class="text-2xl font-bold text-theme-primary">{value}</div>
        </div>
    }
}

#[component]
fn ItemList(title: &'static str, items: Vec<String>) -> impl IntoView {
    (!items.is_empty()).then(|| {
        view! {
            <div class="text-sm">
                <span class="text-theme-muted">{title} ": "</span>
                <span class="text-theme-secondary">{items.join("; ")}</span>
            </div>
        }
    })
}
