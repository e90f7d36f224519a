use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_location;

use crate::ui::auth::use_auth_context;
use crate::ui::{Icon, icons};

/// Sidebar entry: route, label, icon
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/dashboard",
        label: "Dashboard",
        icon: icons::HOME,
    },
    NavItem {
        href: "/events",
        label: "Events",
        icon: icons::CALENDAR,
    },
    NavItem {
        href: "/units",
        label: "Units",
        icon: icons::UNITS,
    },
    NavItem {
        href: "/aars",
        label: "AARs",
        icon: icons::CLIPBOARD,
    },
    NavItem {
        href: "/pricing",
        label: "Pricing",
        icon: icons::CREDIT_CARD,
    },
];

/// Label of the nav entry owning `path`
pub fn section_title(path: &str) -> &'static str {
    NAV_ITEMS
        .iter()
        .find(|item| path.starts_with(item.href))
        .map_or("AfterAction", |item| item.label)
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;

    view! {
        <aside class="w-60 shrink-0 h-screen sticky top-0 flex flex-col bg-theme-surface border-r border-theme-primary theme-transition">
            <div class="px-6 py-4 border-b border-theme-primary bg-theme-secondary">
                <h2 class="text-lg font-bold text-theme-primary">"AfterAction"</h2>
                <p class="text-xs text-theme-muted">"Train, review, improve"</p>
            </div>

            <nav class="flex-1 px-3 py-4 space-y-1">
                {NAV_ITEMS.iter().map(|item| {
                    let href = item.href;
                    let active = move || pathname.with(|p| p.starts_with(href));
                    view! {
                        <A
                            href=href
                            attr:class=move || if active() {
                                "flex items-center gap-3 px-3 py-2 rounded-lg bg-theme-secondary text-theme-accent font-medium"
                            } else {
                                "flex items-center gap-3 px-3 py-2 rounded-lg text-theme-secondary hover:bg-theme-secondary transition-colors"
                            }
                        >
                            <Icon name=item.icon class="w-5 h-5"/>
                            <span>{item.label}</span>
                        </A>
                    }
                }).collect_view()}
            </nav>

            // Role of the signed-in user
            {move || auth.user().map(|user| view! {
                <div class="px-6 py-4 border-t border-theme-primary text-xs text-theme-muted">
                    <div class="font-medium text-theme-secondary">{user.role.label()}</div>
                    {user.role.is_leader().then(|| view! { <div>"Leader"</div> })}
                </div>
            })}
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_title() {
        assert_eq!(section_title("/dashboard"), "Dashboard");
        assert_eq!(section_title("/aars/new"), "AARs");
        assert_eq!(section_title("/login"), "AfterAction");
    }
}
