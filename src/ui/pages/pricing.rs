//! Pricing page: static tiers with a monthly/annual toggle

use leptos::prelude::*;

use crate::core::pricing::{BillingCycle, PricingTier, TIERS};

#[component]
pub fn PricingPage() -> impl IntoView {
    let cycle = RwSignal::new(BillingCycle::default());

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-center gap-3">
                <span class:font-semibold=move || cycle.get() == BillingCycle::Monthly>"Monthly"</span>
                <button
                    type="button"
                    role="switch"
                    aria-label="Bill annually"
                    aria-checked=move || (cycle.get() == BillingCycle::Annual).to_string()
                    class="relative w-12 h-6 rounded-full bg-theme-secondary transition-colors"
                    class:bg-accent-primary=move || cycle.get() == BillingCycle::Annual
                    on:click=move |_| cycle.update(|c| *c = c.toggled())
                >
                    <span
                        class="absolute top-0.5 left-0.5 w-5 h-5 rounded-full bg-white transition-transform"
                        class:translate-x-6=move || cycle.get() == BillingCycle::Annual
                    ></span>
                </button>
                <span class:font-semibold=move || cycle.get() == BillingCycle::Annual>"Annual"</span>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                {TIERS.iter().map(|tier| view! { <TierCard tier=tier cycle=cycle/> }).collect_view()}
            </div>
        </div>
    }
}

#[component]
fn TierCard(tier: &'static PricingTier, cycle: RwSignal<BillingCycle>) -> impl IntoView {
    view! {
        <div class="card p-6 flex flex-col gap-4" class:ring-2=tier.highlighted class:ring-accent-primary=tier.highlighted>
            <div>
                <h3 class="text-lg font-bold text-theme-primary">{tier.name}</h3>
                <p class="text-sm text-theme-muted">{tier.tagline}</p>
            </div>
            <div>
                <div class="text-3xl font-bold text-theme-primary">
                    {move || tier.price_label(cycle.get())}
                </div>
                {move || tier.savings_label(cycle.get()).map(|label| view! {
                    <div class="text-sm text-green-500">{label}</div>
                })}
            </div>
            <ul class="space-y-1 text-sm text-theme-secondary flex-1">
                {tier.features.iter().map(|f| view! { <li>"✓ " {*f}</li> }).collect_view()}
            </ul>
            <button type="button" class=if tier.highlighted { "btn-primary" } else { "btn-secondary" }>
                {format!("Choose {}", tier.name)}
            </button>
        </div>
    }
}
