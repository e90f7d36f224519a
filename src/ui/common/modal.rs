use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

/// Base modal component with consistent structure
#[component]
pub fn BaseModal(
    /// Modal title
    title: &'static str,
    /// Whether modal is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback to close modal
    on_close: Callback<()>,
    /// Modal content
    children: Children,
    /// Maximum width class (default: max-w-2xl)
    #[prop(default = "max-w-2xl")]
    max_width: &'static str,
) -> impl IntoView {
    // Close on Escape key
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.get_untracked() {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <div
            class=move || {
                if is_open.get() {
                    "fixed inset-0 z-50 flex items-center justify-center backdrop-theme transition-all duration-300"
                } else {
                    "fixed inset-0 z-50 flex items-center justify-center backdrop-theme opacity-0 pointer-events-none transition-all duration-300"
                }
            }
            role="dialog"
            aria-modal="true"
            on:click=move |e| {
                #[cfg(not(feature = "ssr"))]
                {
                    if let Some(target) = e.target() {
                        if let Some(element) = target.dyn_ref::<leptos::web_sys::Element>() {
                            if element.class_list().contains("backdrop-theme") {
                                on_close.run(());
                            }
                        }
                    }
                }
                #[cfg(feature = "ssr")]
                {
                    let _ = e;
                }
            }
        >
            <div class=format!("w-full {} card theme-transition", max_width)>
                <div class="card-header">
                    <h3 class="title-lg">{title}</h3>
                    <button
                        class="btn-icon"
                        on:click=move |_| on_close.run(())
                        title="Close"
                        aria-label="Close modal"
                    >
                        <Icon name=icons::X class="icon-standalone"/>
                    </button>
                </div>

                <div class="p-6">
                    {children()}
                </div>
            </div>
        </div>
    }
}

/// Confirmation dialog modal
///
/// Confirming closes the dialog through `on_cancel` after `on_confirm` ran.
#[component]
pub fn ConfirmDialog(
    /// Dialog title
    title: &'static str,
    /// Dialog message
    #[prop(into)]
    message: Signal<String>,
    /// Whether dialog is open
    #[prop(into)]
    is_open: Signal<bool>,
    /// Callback when confirmed
    on_confirm: Callback<()>,
    /// Callback when cancelled
    on_cancel: Callback<()>,
    /// Confirm button text
    #[prop(default = "Confirm")]
    confirm_text: &'static str,
    /// Whether confirm action is destructive (uses danger button)
    #[prop(default = false)]
    is_destructive: bool,
) -> impl IntoView {
    view! {
        <BaseModal
            title=title
            is_open=is_open
            on_close=on_cancel
            max_width="max-w-md"
        >
            <div class="space-y-4">
                <p class="text-theme-secondary">{move || message.get()}</p>

                <div class="flex items-center justify-end gap-2 divider-top pt-4">
                    <button
                        class="btn-secondary"
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        class=if is_destructive { "btn-danger" } else { "btn-primary" }
                        on:click=move |_| {
                            on_confirm.run(());
                            on_cancel.run(());
                        }
                    >
                        {confirm_text}
                    </button>
                </div>
            </div>
        </BaseModal>
    }
}
