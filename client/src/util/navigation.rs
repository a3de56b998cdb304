//! Router side of the navigation bridge.

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::navigation::NavigationState;

/// Forward queued navigation requests to the router.
///
/// Must be installed inside `<Router>`; `navigate` is normally `use_navigate()`.
pub fn install_navigation_bridge<F>(requests: RwSignal<NavigationState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        // Track the sequence so a repeated target still triggers.
        let _ = requests.with(|r| r.request_seq);
        let target = requests.try_update_untracked(NavigationState::take).flatten();
        if let Some(path) = target {
            tracing::debug!(%path, "navigating");
            navigate(&path, NavigateOptions::default());
        }
    });
}
