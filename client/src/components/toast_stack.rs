//! Toast stack rendered in the top-right corner.

use leptos::prelude::*;

use crate::state::toast::{Toast, ToastState};

fn toast_class(toast: &Toast) -> &'static str {
    if toast.notification.is_destructive() { "toast toast--destructive" } else { "toast" }
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toasts.get().toasts
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = toast_class(&toast);
                    let Toast { notification, .. } = toast;
                    let title = notification.title;
                    let description = notification.description;
                    view! {
                        <div class=class>
                            <div class="toast__body">
                                <p class="toast__title">{title}</p>
                                {(!description.is_empty())
                                    .then(|| view! { <p class="toast__description">{description}</p> })}
                            </div>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| {
                                    toasts.update(|s| {
                                        s.dismiss(id);
                                    });
                                }
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
