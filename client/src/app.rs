//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};
use session::config::IdentityConfig;
use session::memory::MemoryProvider;
use session::supabase::SupabaseAuth;
use session::{IdentityProvider, SessionManager};

use crate::components::navigation_bridge::NavigationBridge;
use crate::components::session_provider::SessionProvider;
use crate::components::toast_stack::ToastStack;
use crate::pages::{categories::CategoriesPage, home::HomePage, login::LoginPage};
use crate::state::navigation::{NavigationState, SignalNavigator};
use crate::state::toast::{SignalNotifier, ToastState};

/// Identity provider for this build.
///
/// `SUPABASE_URL` and `SUPABASE_ANON_KEY` are baked in at compile time. Builds
/// without them run against the in-memory demo account.
fn identity_provider() -> Arc<dyn IdentityProvider> {
    let (Some(url), Some(anon_key)) = (option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY")) else {
        tracing::warn!("SUPABASE_URL / SUPABASE_ANON_KEY not set at build time; using the offline demo provider");
        return Arc::new(MemoryProvider::demo());
    };
    match SupabaseAuth::new(&IdentityConfig::new(url, anon_key)) {
        Ok(auth) => Arc::new(auth),
        Err(e) => {
            tracing::warn!(error = %e, "identity client unavailable; using the offline demo provider");
            Arc::new(MemoryProvider::demo())
        }
    }
}

/// Root application component.
///
/// Owns the toast and navigation sinks, builds the session manager on top of
/// them, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let toasts = RwSignal::new(ToastState::default());
    let navigation = RwSignal::new(NavigationState::default());
    provide_context(toasts);
    provide_context(navigation);

    let manager = Arc::new(SessionManager::new(
        identity_provider(),
        Arc::new(SignalNotifier::new(toasts)),
        Arc::new(SignalNavigator::new(navigation)),
    ));

    view! {
        <Stylesheet id="leptos" href="/pkg/insure-ui.css"/>
        <Title text="Insurance Assistant"/>

        <Router>
            <SessionProvider manager=manager>
                <NavigationBridge/>
                <ToastStack/>
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("insurance-categories") view=CategoriesPage/>
                </Routes>
            </SessionProvider>
        </Router>
    }
}
