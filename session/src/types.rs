//! Identity-provider payloads and the local user projection.
//!
//! DESIGN
//! ======
//! Provider types mirror the Supabase Auth JSON shapes so `serde` can decode
//! responses directly. `User` is the only type the UI reads; it is rebuilt from
//! a `ProviderUser` every time a session is observed and never mutated in place.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

// =============================================================================
// PROVIDER PAYLOADS
// =============================================================================

/// Profile metadata attached to an account at sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Account record as reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    /// Opaque provider identifier.
    pub id: String,
    /// Phone-only accounts have no email; the provider sends `null`.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Authenticated session issued by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Expiry as Unix seconds. `None` means the provider did not say.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: ProviderUser,
}

impl ProviderSession {
    /// Whether the access token expires within `margin_secs` of `now_secs`.
    #[must_use]
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - margin_secs <= now_secs)
    }
}

/// Kind of session change delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// Delivered once to each new subscriber with the current session.
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// A session-change notification: what happened and the session afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthChange {
    pub event: AuthEvent,
    pub session: Option<ProviderSession>,
}

impl AuthChange {
    #[must_use]
    pub fn new(event: AuthEvent, session: Option<ProviderSession>) -> Self {
        Self { event, session }
    }

    /// Project the carried session into a local user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.session.as_ref().map(|s| User::from_provider(&s.user))
    }
}

/// Email + password pair for credential sign-in.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account-creation request including profile metadata.
#[derive(Clone, Debug, Serialize)]
pub struct SignUpRequest {
    #[serde(flatten)]
    pub credentials: Credentials,
    /// Sent as `data` so the provider stores it under `user_metadata`.
    #[serde(rename = "data")]
    pub metadata: UserMetadata,
}

// =============================================================================
// LOCAL PROJECTION
// =============================================================================

/// Signed-in user as seen by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    /// Avatar image URL.
    pub avatar: Option<String>,
}

impl User {
    /// Build the projection from a provider account record.
    #[must_use]
    pub fn from_provider(user: &ProviderUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            name: user.user_metadata.full_name.clone(),
            avatar: user.user_metadata.avatar_url.clone(),
        }
    }

    /// Name to show in UI chrome: full name when set, email otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.email)
    }
}
