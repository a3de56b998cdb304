//! Signed-in user chip with a logout button.

#[cfg(test)]
#[path = "user_badge_test.rs"]
mod user_badge_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;

use crate::state::session::use_session;

/// Two-letter initials shown when the user has no avatar.
pub fn initials(label: &str) -> String {
    let letters: String = label
        .split(|c: char| c.is_whitespace() || c == '@' || c == '.')
        .filter_map(|part| part.chars().next())
        .take(2)
        .collect();
    letters.to_uppercase()
}

#[component]
pub fn UserBadge() -> impl IntoView {
    let session = use_session();

    let label = move || session.user().map(|u| u.display_name().to_owned()).unwrap_or_default();
    let avatar = move || session.user().and_then(|u| u.avatar);

    view! {
        <div class="user-badge">
            {move || match avatar() {
                Some(src) => view! { <img class="user-badge__avatar" src=src alt="" /> }.into_any(),
                None => {
                    view! { <span class="user-badge__avatar user-badge__avatar--initials">{initials(&label())}</span> }
                        .into_any()
                }
            }}
            <span class="user-badge__name">{label}</span>
            <button
                class="btn user-badge__logout"
                disabled=move || session.loading()
                on:click=move |_| session.logout()
            >
                "Log out"
            </button>
        </div>
    }
}
