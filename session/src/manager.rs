//! Session manager: current-user state and the credential flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! One manager exists per mounted app (or CLI run). It owns the session-change
//! subscription for its activation lifetime, publishes `SessionState` through
//! a `watch` channel, and reports every credential outcome on the injected
//! notifier instead of returning it.
//!
//! ERROR HANDLING
//! ==============
//! `login`, `signup` and `logout` never fail from the caller's point of view.
//! Provider errors become exactly one destructive notification and a settled
//! `loading = false`; callers that need the outcome watch the state.

#[cfg(test)]
#[path = "manager_test.rs"]
mod manager_test;

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::avatar::avatar_url;
use crate::effects::{AUTHENTICATED_HOME, Navigator, Notification, Notifier, ROOT, SIGN_IN};
use crate::provider::{IdentityProvider, Subscription};
use crate::store::{SessionState, SessionStore};
use crate::types::{AuthChange, Credentials, SignUpRequest, User, UserMetadata};

const LOGIN_FALLBACK: &str = "An error occurred during login";
const SIGNUP_FALLBACK: &str = "An error occurred during signup";
const LOGOUT_FALLBACK: &str = "An error occurred during logout";

/// Owns the signed-in user projection and mediates credential operations.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    store: Arc<SessionStore>,
    subscription: Mutex<Option<Subscription>>,
}

impl SessionManager {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            provider,
            notifier,
            navigator,
            store: Arc::new(SessionStore::new()),
            subscription: Mutex::new(None),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.store.snapshot()
    }

    /// Receiver for state changes, for reactive consumers.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.store.watch()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.store.snapshot().user
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Subscribe to session changes and load the current session.
    ///
    /// Events delivered while the fetch is in flight are applied as they
    /// arrive; the fetch result is dropped if any of them is newer. Calling
    /// `activate` on an already active manager only re-fetches.
    pub async fn activate(&self) {
        let _pending = self.store.begin();

        {
            let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() && !self.store.is_closed() {
                *slot = Some(self.subscribe());
            }
        }

        let ticket = self.store.ticket();
        let user = match self.provider.get_session().await {
            Ok(session) => session.map(|s| User::from_provider(&s.user)),
            Err(e) => {
                tracing::warn!(error = %e, "initial session fetch failed; treating as signed out");
                None
            }
        };
        let user_id = user.as_ref().map(|u| u.id.clone());
        if self.store.apply(ticket, user) {
            tracing::info!(user_id = ?user_id, "session initialized");
        }
    }

    /// Release the session-change subscription. Later events are ignored.
    ///
    /// Safe to call more than once; only the first call releases.
    pub fn deactivate(&self) {
        self.store.close();
        let released = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = released {
            subscription.unsubscribe();
            tracing::debug!("session manager deactivated");
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the user is populated by the resulting session-change event,
    /// not by this call.
    pub async fn login(&self, email: &str, password: &str) {
        let _pending = self.store.begin();
        let credentials = Credentials { email: email.to_owned(), password: password.to_owned() };

        match self.provider.sign_in_with_password(credentials).await {
            Ok(()) => {
                tracing::info!("login succeeded");
                self.notifier
                    .notify(Notification::info("Welcome back!", "You have successfully logged in."));
                self.navigator.navigate(AUTHENTICATED_HOME);
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.notify_failure("Login failed", &e, LOGIN_FALLBACK);
            }
        }
    }

    /// Create an account. Does not sign the user in.
    pub async fn signup(&self, email: &str, password: &str, name: &str) {
        let _pending = self.store.begin();
        let request = SignUpRequest {
            credentials: Credentials { email: email.to_owned(), password: password.to_owned() },
            metadata: UserMetadata { full_name: Some(name.to_owned()), avatar_url: Some(avatar_url(email)) },
        };

        match self.provider.sign_up(request).await {
            Ok(()) => {
                tracing::info!("signup succeeded; awaiting email verification");
                self.notifier.notify(Notification::info(
                    "Account created!",
                    "Please check your email to verify your account.",
                ));
                self.navigator.navigate(SIGN_IN);
            }
            Err(e) => {
                tracing::warn!(error = %e, "signup failed");
                self.notify_failure("Signup failed", &e, SIGNUP_FALLBACK);
            }
        }
    }

    /// Sign out. The user is cleared only when the provider confirms.
    ///
    /// The confirmation is the newest observation at the moment it arrives,
    /// so it outranks any event delivered while the call was in flight.
    pub async fn logout(&self) {
        let _pending = self.store.begin();

        match self.provider.sign_out().await {
            Ok(()) => {
                self.store.apply_now(None);
                tracing::info!("logout succeeded");
                self.notifier
                    .notify(Notification::info("Logged out", "You have been successfully logged out."));
                self.navigator.navigate(ROOT);
            }
            Err(e) => {
                tracing::warn!(error = %e, "logout failed");
                self.notify_failure("Logout failed", &e, LOGOUT_FALLBACK);
            }
        }
    }

    fn subscribe(&self) -> Subscription {
        let store = Arc::downgrade(&self.store);
        self.provider.on_session_change(Arc::new(move |change: &AuthChange| {
            let Some(store) = store.upgrade() else {
                return;
            };
            let user = change.user();
            let user_id = user.as_ref().map(|u| u.id.clone());
            if store.apply_now(user) {
                tracing::debug!(event = ?change.event, user_id = ?user_id, "session change applied");
            }
        }))
    }

    fn notify_failure(&self, title: &str, error: &crate::ProviderError, fallback: &str) {
        let description = error.user_message().unwrap_or_else(|| fallback.to_owned());
        self.notifier.notify(Notification::destructive(title, description));
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.deactivate();
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("state", &self.store.snapshot())
            .field("active", &self.is_active())
            .finish_non_exhaustive()
    }
}
