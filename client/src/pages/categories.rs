//! Insurance categories page (signed-in users only).
//!
//! SYSTEM CONTEXT
//! ==============
//! Landing route after a successful sign-in. Unauthenticated visitors are
//! redirected to the sign-in page once the session has settled.

#[cfg(test)]
#[path = "categories_test.rs"]
mod categories_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::User;

use crate::components::user_badge::UserBadge;
use crate::state::session::use_session;
use crate::util::auth::install_unauth_redirect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Category {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
}

pub const CATEGORIES: &[Category] = &[
    Category { slug: "auto", title: "Auto", summary: "Liability, collision and comprehensive cover for your vehicles." },
    Category { slug: "home", title: "Home", summary: "Protect the building and its contents against damage and theft." },
    Category { slug: "health", title: "Health", summary: "Medical, dental and vision plans for you and your family." },
    Category { slug: "life", title: "Life", summary: "Term and whole life policies that support those who depend on you." },
    Category { slug: "travel", title: "Travel", summary: "Trip cancellation, lost luggage and emergency care abroad." },
];

/// Greeting line for the page header.
pub fn greeting(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("Welcome, {}", user.display_name()),
        None => "Welcome".to_owned(),
    }
}

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    install_unauth_redirect(session.state(), move |path, options| navigate(path, options));

    view! {
        <main class="categories-page">
            <header class="categories-header">
                <h1>{move || greeting(session.user().as_ref())}</h1>
                <Show when=move || session.user().is_some()>
                    <UserBadge />
                </Show>
            </header>
            <Show
                when=move || session.user().is_some()
                fallback=|| view! { <p class="categories-loading">"Loading your session..."</p> }
            >
                <ul class="category-grid">
                    {CATEGORIES
                        .iter()
                        .map(|category| {
                            view! {
                                <li class="category-card" data-slug=category.slug>
                                    <h2>{category.title}</h2>
                                    <p>{category.summary}</p>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </main>
    }
}
