//! In-process identity provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used when no identity service is configured (offline CLI runs, local
//! browser builds) and as a realistic provider in tests. Rejection messages
//! match the hosted service so UI copy behaves the same in both modes.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::clock::now_secs;
use crate::error::ProviderError;
use crate::provider::{IdentityProvider, ListenerSet, SessionListener, Subscription};
use crate::types::{AuthChange, AuthEvent, Credentials, ProviderSession, ProviderUser, SignUpRequest, UserMetadata};

const SESSION_TTL_SECS: i64 = 3600;
const MIN_PASSWORD_LEN: usize = 6;

pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";
pub const ALREADY_REGISTERED: &str = "User already registered";
pub const EMAIL_NOT_CONFIRMED: &str = "Email not confirmed";
pub const WEAK_PASSWORD: &str = "Password should be at least 6 characters.";

/// Seeded account available in offline mode.
pub const DEMO_EMAIL: &str = "demo@example.com";
pub const DEMO_PASSWORD: &str = "demo1234";

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password: String,
    confirmed: bool,
    metadata: UserMetadata,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, Account>,
    session: Option<ProviderSession>,
    issued: u64,
    accounts_created: u64,
}

impl Inner {
    fn next_account_id(&mut self) -> String {
        self.accounts_created += 1;
        format!("mem-user-{}", self.accounts_created)
    }

    fn issue_session(&mut self, account: &Account) -> ProviderSession {
        self.issued += 1;
        let session = ProviderSession {
            access_token: format!("mem-access-{}-{}", account.id, self.issued),
            refresh_token: format!("mem-refresh-{}-{}", account.id, self.issued),
            expires_at: Some(now_secs().saturating_add(SESSION_TTL_SECS)),
            user: ProviderUser {
                id: account.id.clone(),
                email: Some(account.email.clone()),
                user_metadata: account.metadata.clone(),
            },
        };
        self.session = Some(session.clone());
        session
    }
}

/// Identity provider that keeps accounts and the session in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    inner: Mutex<Inner>,
    listeners: ListenerSet,
    auto_confirm: bool,
}

impl MemoryProvider {
    /// Provider that requires [`MemoryProvider::confirm`] before sign-in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose sign-ups are confirmed and signed in immediately.
    #[must_use]
    pub fn with_auto_confirm() -> Self {
        Self { auto_confirm: true, ..Self::default() }
    }

    /// Provider seeded with the offline demo account.
    #[must_use]
    pub fn demo() -> Self {
        let provider = Self::new();
        provider.register(DEMO_EMAIL, DEMO_PASSWORD, Some("Demo User"));
        provider
    }

    /// Seed a confirmed account.
    pub fn register(&self, email: &str, password: &str, full_name: Option<&str>) -> String {
        let mut inner = self.lock();
        let id = inner.next_account_id();
        let email = normalize_email(email);
        let account = Account {
            id: id.clone(),
            email: email.clone(),
            password: password.to_owned(),
            confirmed: true,
            metadata: UserMetadata { full_name: full_name.map(str::to_owned), avatar_url: None },
        };
        inner.accounts.insert(email, account);
        id
    }

    /// Mark an account's email as verified. Returns `false` for unknown emails.
    pub fn confirm(&self, email: &str) -> bool {
        let mut inner = self.lock();
        match inner.accounts.get_mut(&normalize_email(email)) {
            Some(account) => {
                account.confirmed = true;
                true
            }
            None => false,
        }
    }

    /// Current session without going through the trait.
    #[must_use]
    pub fn current_session(&self) -> Option<ProviderSession> {
        self.lock().session.clone()
    }

    /// Number of registered session listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

fn rejected(status: u16, message: &str) -> ProviderError {
    ProviderError::Rejected { status: Some(status), message: Some(message.to_owned()) }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl IdentityProvider for MemoryProvider {
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        Ok(self.current_session())
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        let initial = AuthChange::new(AuthEvent::InitialSession, self.current_session());
        let subscription = self.listeners.subscribe(std::sync::Arc::clone(&listener));
        listener(&initial);
        subscription
    }

    async fn sign_in_with_password(&self, credentials: Credentials) -> Result<(), ProviderError> {
        let session = {
            let mut inner = self.lock();
            let account = inner
                .accounts
                .get(&normalize_email(&credentials.email))
                .filter(|a| a.password == credentials.password)
                .cloned()
                .ok_or_else(|| rejected(400, INVALID_CREDENTIALS))?;
            if !account.confirmed {
                return Err(rejected(400, EMAIL_NOT_CONFIRMED));
            }
            inner.issue_session(&account)
        };
        self.listeners
            .emit(&AuthChange::new(AuthEvent::SignedIn, Some(session)));
        Ok(())
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<(), ProviderError> {
        if request.credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(rejected(422, WEAK_PASSWORD));
        }
        let session = {
            let mut inner = self.lock();
            let email = normalize_email(&request.credentials.email);
            if inner.accounts.contains_key(&email) {
                return Err(rejected(422, ALREADY_REGISTERED));
            }
            let account = Account {
                id: inner.next_account_id(),
                email: email.clone(),
                password: request.credentials.password,
                confirmed: self.auto_confirm,
                metadata: request.metadata,
            };
            inner.accounts.insert(email, account.clone());
            self.auto_confirm.then(|| inner.issue_session(&account))
        };
        if let Some(session) = session {
            self.listeners
                .emit(&AuthChange::new(AuthEvent::SignedIn, Some(session)));
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        self.lock().session = None;
        self.listeners.emit(&AuthChange::new(AuthEvent::SignedOut, None));
        Ok(())
    }
}
