//! Identity-provider seam and session-change subscriptions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager only ever talks to `dyn IdentityProvider`. Concrete
//! providers (`supabase`, `memory`) keep their listeners in a `ListenerSet`
//! and hand out `Subscription` handles that unregister on release.
//!
//! TRADE-OFFS
//! ==========
//! `emit` snapshots the listener list before invoking callbacks so listeners
//! may subscribe or unsubscribe re-entrantly. The cost is that a listener
//! released mid-dispatch can still see that one in-flight change; consumers
//! that care guard on their own liveness flag.

#[cfg(test)]
#[path = "provider_test.rs"]
mod provider_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::ProviderError;
use crate::types::{AuthChange, Credentials, ProviderSession, SignUpRequest};

/// Callback invoked for every session change.
pub type SessionListener = Arc<dyn Fn(&AuthChange) + Send + Sync>;

/// External service of record for credentials and sessions.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait IdentityProvider: Send + Sync {
    /// Current session, if any.
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError>;

    /// Register a session-change listener. The listener stays registered until
    /// the returned handle is released.
    fn on_session_change(&self, listener: SessionListener) -> Subscription;

    async fn sign_in_with_password(&self, credentials: Credentials) -> Result<(), ProviderError>;

    async fn sign_up(&self, request: SignUpRequest) -> Result<(), ProviderError>;

    async fn sign_out(&self) -> Result<(), ProviderError>;
}

// =============================================================================
// SUBSCRIPTION HANDLE
// =============================================================================

/// Owned handle for a registered listener.
///
/// The release action runs exactly once: on [`Subscription::unsubscribe`] or
/// on drop, whichever comes first.
#[must_use = "dropping a Subscription immediately unregisters the listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Handle with nothing to release.
    pub fn noop() -> Self {
        Self { release: None }
    }

    /// Release the listener now.
    pub fn unsubscribe(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_once();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// LISTENER SET
// =============================================================================

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, SessionListener>,
}

/// Listener registry shared by provider implementations.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Arc<Mutex<Registry>>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; the returned handle removes it again.
    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let id = {
            let mut registry = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            registry.next_id += 1;
            let id = registry.next_id;
            registry.listeners.insert(id, listener);
            id
        };
        tracing::debug!(listener = id, "session listener registered");

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .remove(&id);
                tracing::debug!(listener = id, "session listener released");
            }
        })
    }

    /// Deliver `change` to every registered listener.
    pub fn emit(&self, change: &AuthChange) {
        let listeners: Vec<SessionListener> = self
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .values()
            .cloned()
            .collect();
        for listener in listeners {
            listener(change);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}
