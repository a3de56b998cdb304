//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;
use session::effects::{AUTHENTICATED_HOME, SIGN_IN};

use crate::state::session::use_session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let signed_in = move || session.user().is_some();

    view! {
        <main class="home-page">
            <section class="home-hero">
                <h1>"Insurance Assistant"</h1>
                <p class="home-hero__subtitle">
                    "Compare coverage, ask questions and keep track of your policies in one place."
                </p>
                <Show
                    when=signed_in
                    fallback=|| view! { <A href=SIGN_IN attr:class="btn btn--primary">"Sign in"</A> }
                >
                    <A href=AUTHENTICATED_HOME attr:class="btn btn--primary">"Browse categories"</A>
                </Show>
            </section>
        </main>
    }
}
