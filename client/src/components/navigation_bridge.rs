//! Renderless component that hands queued navigation to the router.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::navigation::NavigationState;
use crate::util::navigation::install_navigation_bridge;

/// Must be rendered inside `<Router>`.
#[component]
pub fn NavigationBridge() -> impl IntoView {
    let requests = expect_context::<RwSignal<NavigationState>>();
    let navigate = use_navigate();
    install_navigation_bridge(requests, move |path, options| navigate(path, options));
}
