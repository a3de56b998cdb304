//! Session context for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionProvider` builds one `SessionContext` per app mount. Route guards
//! and user-aware components read it through `use_session`, which refuses to
//! run outside a provider so a missing provider shows up as a loud panic in
//! development instead of a silently signed-out UI.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use leptos::prelude::*;
use session::{SessionManager, SessionState, User};

/// Reactive handle to the session manager.
///
/// `state` mirrors the manager's published state so views can track it like
/// any other signal.
#[derive(Clone, Copy)]
pub struct SessionContext {
    manager: StoredValue<Arc<SessionManager>>,
    state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn new(manager: Arc<SessionManager>) -> Self {
        let state = RwSignal::new(manager.state());
        Self { manager: StoredValue::new(manager), state }
    }

    /// Read-side signal for views.
    pub fn state(&self) -> RwSignal<SessionState> {
        self.state
    }

    /// Current user (tracked).
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    /// Whether an operation is in flight (tracked).
    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// Copy the manager's latest state into the signal.
    pub fn sync(&self) {
        if let Some(manager) = self.manager.try_get_value() {
            self.state.set(manager.state());
        }
    }

    pub fn login(&self, email: String, password: String) {
        self.run(move |manager| async move { manager.login(&email, &password).await });
    }

    pub fn signup(&self, email: String, password: String, name: String) {
        self.run(move |manager| async move { manager.signup(&email, &password, &name).await });
    }

    pub fn logout(&self) {
        self.run(|manager| async move { manager.logout().await });
    }

    /// Mirror manager state into the signal and load the initial session.
    #[cfg(feature = "csr")]
    pub(crate) fn start(&self) {
        let Some(manager) = self.manager.try_get_value() else {
            return;
        };
        let state = self.state;
        let mut changes = manager.watch();
        leptos::task::spawn_local(async move {
            while changes.changed().await.is_ok() {
                let snapshot = changes.borrow_and_update().clone();
                if state.try_set(snapshot).is_some() {
                    break;
                }
            }
        });
        leptos::task::spawn_local(async move { manager.activate().await });
    }

    #[cfg(feature = "csr")]
    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Arc<SessionManager>) -> Fut + 'static,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let Some(manager) = self.manager.try_get_value() else {
            tracing::warn!("session operation requested after the provider was disposed");
            return;
        };
        let state = self.state;
        leptos::task::spawn_local(async move {
            op(Arc::clone(&manager)).await;
            let _ = state.try_set(manager.state());
        });
    }

    /// Outside the browser there is no local executor; operations are dropped.
    #[cfg(not(feature = "csr"))]
    fn run<F, Fut>(&self, op: F)
    where
        F: FnOnce(Arc<SessionManager>) -> Fut + 'static,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let _ = op;
    }
}

/// Make `session` available to descendants.
pub fn provide_session(session: SessionContext) {
    provide_context(session);
}

/// Session context of the nearest `SessionProvider`.
///
/// # Panics
///
/// Panics when called outside a `SessionProvider`. This is a wiring bug, not a
/// runtime condition, so there is no fallback value.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .unwrap_or_else(|| panic!("use_session() called outside a SessionProvider; wrap the view tree in <SessionProvider>"))
}
