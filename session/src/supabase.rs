//! Supabase Auth (GoTrue) REST provider.
//!
//! ARCHITECTURE
//! ============
//! The hosted service issues and verifies credentials; this client keeps the
//! latest session in memory, refreshes it when it is about to expire, and
//! fans session changes out to listeners the same way the JS SDK does
//! (`InitialSession` on subscribe, then `SignedIn` / `TokenRefreshed` /
//! `SignedOut`).
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ProviderError::Rejected` with the service's own
//! message (`msg`, `message`, `error_description` or `error`, first non-empty)
//! so the UI shows e.g. "Invalid login credentials" verbatim.

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Deserialize;
use serde_json::Value;

use crate::clock::now_secs;
use crate::config::IdentityConfig;
use crate::error::ProviderError;
use crate::provider::{IdentityProvider, ListenerSet, SessionListener, Subscription};
use crate::types::{AuthChange, AuthEvent, Credentials, ProviderSession, ProviderUser, SignUpRequest};

/// Refresh the access token when it expires within this many seconds.
const REFRESH_MARGIN_SECS: i64 = 60;

const PASSWORD_GRANT_PATH: &str = "/token?grant_type=password";
const REFRESH_GRANT_PATH: &str = "/token?grant_type=refresh_token";
const SIGN_UP_PATH: &str = "/signup";
const LOGOUT_PATH: &str = "/logout";

/// Identity provider backed by a Supabase project's auth API.
pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: Mutex<Option<ProviderSession>>,
    listeners: ListenerSet,
}

impl SupabaseAuth {
    /// Build a client for the project described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &IdentityConfig) -> Result<Self, ProviderError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(std::time::Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(std::time::Duration::from_secs(config.timeouts.connect_secs));
        let http = builder
            .build()
            .map_err(|e| ProviderError::ClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.auth_base(),
            anon_key: config.anon_key.clone(),
            session: Mutex::new(None),
            listeners: ListenerSet::new(),
        })
    }

    /// Session currently held by this client, without refreshing.
    #[must_use]
    pub fn current_session(&self) -> Option<ProviderSession> {
        self.session
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Exchange the refresh token for a new session.
    ///
    /// A refresh the service rejects (revoked or reused token) ends the local
    /// session and emits `SignedOut`.
    ///
    /// # Errors
    ///
    /// Returns transport and decode failures; the session is kept in that case.
    pub async fn refresh_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        let Some(refresh_token) = self.current_session().map(|s| s.refresh_token) else {
            return Ok(None);
        };
        let body = serde_json::json!({ "refresh_token": refresh_token });
        match self.post_json(REFRESH_GRANT_PATH, None, &body).await {
            Ok(text) => {
                let session = decode_token_response(&text, now_secs())?;
                self.replace_session(Some(session.clone()), AuthEvent::TokenRefreshed);
                tracing::debug!(user_id = %session.user.id, "session refreshed");
                Ok(Some(session))
            }
            Err(e @ ProviderError::Rejected { .. }) => {
                tracing::warn!(error = %e, "session refresh rejected; signing out locally");
                self.replace_session(None, AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post_json(&self, path: &str, bearer: Option<&str>, body: &Value) -> Result<String, ProviderError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer.unwrap_or(self.anon_key.as_str()))
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if !(200..300).contains(&status) {
            return Err(ProviderError::Rejected { status: Some(status), message: error_message(&text) });
        }
        Ok(text)
    }

    fn replace_session(&self, session: Option<ProviderSession>, event: AuthEvent) {
        {
            let mut slot = self.session.lock().unwrap_or_else(PoisonError::into_inner);
            slot.clone_from(&session);
        }
        self.listeners.emit(&AuthChange::new(event, session));
    }
}

impl std::fmt::Debug for SupabaseAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuth")
            .field("base_url", &self.base_url)
            .field("signed_in", &self.current_session().is_some())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl IdentityProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        match self.current_session() {
            Some(session) if session.expires_within(now_secs(), REFRESH_MARGIN_SECS) => {
                self.refresh_session().await
            }
            other => Ok(other),
        }
    }

    fn on_session_change(&self, listener: SessionListener) -> Subscription {
        let initial = AuthChange::new(AuthEvent::InitialSession, self.current_session());
        let subscription = self.listeners.subscribe(Arc::clone(&listener));
        listener(&initial);
        subscription
    }

    async fn sign_in_with_password(&self, credentials: Credentials) -> Result<(), ProviderError> {
        let body = serde_json::to_value(&credentials).map_err(|e| ProviderError::Decode(e.to_string()))?;
        let text = self.post_json(PASSWORD_GRANT_PATH, None, &body).await?;
        let session = decode_token_response(&text, now_secs())?;
        tracing::info!(user_id = %session.user.id, "password sign-in accepted");
        self.replace_session(Some(session), AuthEvent::SignedIn);
        Ok(())
    }

    async fn sign_up(&self, request: SignUpRequest) -> Result<(), ProviderError> {
        let body = serde_json::to_value(&request).map_err(|e| ProviderError::Decode(e.to_string()))?;
        let text = self.post_json(SIGN_UP_PATH, None, &body).await?;
        if let Some(session) = decode_sign_up_response(&text, now_secs())? {
            self.replace_session(Some(session), AuthEvent::SignedIn);
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if let Some(session) = self.current_session() {
            let result = self
                .post_json(LOGOUT_PATH, Some(&session.access_token), &serde_json::json!({}))
                .await;
            match result {
                Ok(_) => {}
                Err(ProviderError::Rejected { status: Some(401 | 403 | 404), .. }) => {
                    tracing::debug!("access token already invalid; clearing local session");
                }
                Err(e) => return Err(e),
            }
        }
        self.replace_session(None, AuthEvent::SignedOut);
        Ok(())
    }
}

// =============================================================================
// RESPONSE DECODING
// =============================================================================

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: ProviderUser,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> ProviderSession {
        let expires_at = self
            .expires_at
            .or_else(|| self.expires_in.map(|secs| now.saturating_add(secs)));
        ProviderSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

/// Sign-up answers with a full session when email confirmation is disabled,
/// and with the bare account otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(TokenResponse),
    User(ProviderUser),
}

fn decode_token_response(text: &str, now: i64) -> Result<ProviderSession, ProviderError> {
    serde_json::from_str::<TokenResponse>(text)
        .map(|token| token.into_session(now))
        .map_err(|e| ProviderError::Decode(e.to_string()))
}

fn decode_sign_up_response(text: &str, now: i64) -> Result<Option<ProviderSession>, ProviderError> {
    match serde_json::from_str::<SignUpResponse>(text) {
        Ok(SignUpResponse::Session(token)) => Ok(Some(token.into_session(now))),
        Ok(SignUpResponse::User(_)) => Ok(None),
        Err(e) => Err(ProviderError::Decode(e.to_string())),
    }
}

fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| {
            value
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_owned)
        })
}
