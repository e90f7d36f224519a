use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use crate::ui::auth::use_auth_context;
use crate::ui::sidebar::section_title;
use crate::ui::{Icon, icons};

#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();
    let pathname = use_location().pathname;
    let signing_out = RwSignal::new(false);

    let on_logout = move |_| {
        if signing_out.get_untracked() {
            return;
        }
        signing_out.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let redirect = auth.logout().await;
            signing_out.set(false);
            navigate(redirect, Default::default());
        });
    };

    view! {
        <header class="sticky top-0 z-40 bg-theme-primary/80 backdrop-blur-md border-b border-theme">
            <div class="flex items-center justify-between h-16 px-6">
                <h1 class="text-xl font-bold text-theme-primary">{move || pathname.with(|p| section_title(p))}</h1>

                <div class="flex items-center gap-4">
                    {move || auth.user().map(|user| view! {
                        <div class="text-right">
                            <div class="text-sm font-medium text-theme-primary">{user.display_name()}</div>
                            <div class="text-xs text-theme-muted">{user.role.label()}</div>
                        </div>
                    })}
                    <button
                        class="flex items-center gap-2 px-3 py-2 rounded-lg text-theme-secondary hover:bg-theme-secondary transition-colors disabled:opacity-50"
                        disabled=move || signing_out.get()
                        on:click=on_logout
                    >
                        <Icon name=icons::LOGOUT class="w-5 h-5"/>
                        "Sign out"
                    </button>
                </div>
            </div>
        </header>
    }
}
