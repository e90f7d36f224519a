//! Units page: the unit hierarchy as an indented tree

use leptos::prelude::*;

use crate::core::query_cache::keys;
use crate::core::units::UnitTree;
use crate::core::{Unit, UnitLevel};
use crate::ui::auth::use_auth_context;
use crate::ui::common::{EmptyState, LoadingSpinner, QueryError};
use crate::ui::icon::{Icon, icons};
use crate::ui::query::use_query;

fn level_badge_class(level: UnitLevel) -> &'static str {
    match level {
        UnitLevel::Division | UnitLevel::Brigade => "badge badge-primary",
        UnitLevel::Battalion | UnitLevel::Company => "badge badge-info",
        _ => "badge badge-default",
    }
}

#[component]
pub fn UnitsPage() -> impl IntoView {
    let auth = use_auth_context();
    let units = use_query::<Vec<Unit>, _, _>(keys::UNITS, |api| async move {
        api.list_units().await
    });

    let tree = Signal::derive(move || units.data.get().map(UnitTree::build));
    let own_unit = Signal::derive(move || auth.user().map(|u| u.unit_id));

    view! {
        <div class="space-y-6">
            <QueryError error=units.error/>

            // Chain of command of the user's unit
            {move || {
                let (Some(tree), Some(unit_id)) = (tree.get(), own_unit.get()) else {
                    return ().into_any();
                };
                let chain: Vec<String> = tree.path_to(unit_id).iter().map(|u| u.name.clone()).collect();
                if chain.is_empty() {
                    return ().into_any();
                }
                let last = chain.len() - 1;
                view! {
                    <nav class="flex flex-wrap items-center gap-1 text-sm text-theme-secondary" aria-label="Your unit">
                        {chain.into_iter().enumerate().map(|(i, name)| view! {
                            <span class:font-semibold=i == last>{name}</span>
                            {(i != last).then(|| view! { <Icon name=icons::CHEVRON_RIGHT class="w-4 h-4"/> })}
                        }).collect_view()}
                    </nav>
                }.into_any()
            }}

            <section class="card">
                <div class="card-header">
                    <h3 class="title-lg">"Unit hierarchy"</h3>
                </div>
                {move || match tree.get() {
                    None if units.loading.get() => view! { <LoadingSpinner/> }.into_any(),
                    None => view! { <EmptyState message="Units could not be loaded"/> }.into_any(),
                    Some(tree) if tree.is_empty() => view! { <EmptyState message="No units yet"/> }.into_any(),
                    Some(tree) => {
                        let own = own_unit.get();
                        view! {
                            <ul class="py-2">
                                {tree.rows().into_iter().map(|row| {
                                    let indent = format!("padding-left: {}rem", 1.5 + row.depth as f64 * 1.5);
                                    let is_own = own == Some(row.unit.id);
                                    view! {
                                        <li class="flex items-center justify-between pr-6 py-2" style=indent>
                                            <div class="flex items-center gap-3">
                                                <span class="font-medium text-theme-primary" class:text-theme-accent=is_own>
                                                    {row.unit.name.clone()}
                                                </span>
                                                <span class=level_badge_class(row.unit.unit_level)>
                                                    {row.unit.unit_level.label()}
                                                </span>
                                                {(row.child_count > 0).then(|| view! {
                                                    <span class="text-xs text-theme-muted">
                                                        {format!("{} sub-unit(s)", row.child_count)}
                                                    </span>
                                                })}
                                            </div>
                                            <code class="text-xs text-theme-secondary select-all" title="Referral code">
                                                {row.unit.referral_code.clone()}
                                            </code>
                                        </li>
                                    }
                                }).collect_view()}
                            </ul>
                        }.into_any()
                    }
                }}
            </section>
        </div>
    }
}
