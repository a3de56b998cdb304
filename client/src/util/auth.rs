//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::SessionState;
use session::effects::SIGN_IN;

/// True once the session has settled without a user.
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to the sign-in page whenever the session settles without a user.
pub fn install_unauth_redirect<F>(state: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if state.with(should_redirect_unauth) {
            navigate(SIGN_IN, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
