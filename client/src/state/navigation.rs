//! Navigation requests raised outside the router.
//!
//! The session manager runs outside any component, so it cannot call the
//! router directly. It records the target here and `NavigationBridge`, which
//! lives inside `<Router>`, performs the actual navigation.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use leptos::prelude::*;
use session::Navigator;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    /// Target not yet handed to the router.
    pub pending: Option<String>,
    /// Bumped on every request so repeated targets still register.
    pub request_seq: u64,
}

impl NavigationState {
    pub fn request(&mut self, path: &str) {
        self.pending = Some(path.to_owned());
        self.request_seq += 1;
    }

    pub fn take(&mut self) -> Option<String> {
        self.pending.take()
    }
}

/// `Navigator` that queues targets for `NavigationBridge`.
#[derive(Clone, Copy)]
pub struct SignalNavigator {
    requests: RwSignal<NavigationState>,
}

impl SignalNavigator {
    pub fn new(requests: RwSignal<NavigationState>) -> Self {
        Self { requests }
    }
}

impl Navigator for SignalNavigator {
    fn navigate(&self, path: &str) {
        if self.requests.try_update(|state| state.request(path)).is_none() {
            tracing::debug!(path, "navigation dropped: navigation state disposed");
        }
    }
}
