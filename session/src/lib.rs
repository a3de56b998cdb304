//! Session lifecycle for the insurance-assistant front-end.
//!
//! This crate owns the signed-in user projection and the login/signup/logout
//! flows. Credential checks, token issuance and refresh belong to an external
//! identity provider reached through [`provider::IdentityProvider`]; UI side
//! effects (toasts, route changes) go through [`effects::Notifier`] and
//! [`effects::Navigator`] so both the Leptos client and the CLI can drive the
//! same [`manager::SessionManager`].
//!
//! MODULES
//! =======
//! - `types`: provider session payloads and the local `User` projection.
//! - `store`: sequenced session state with the outstanding-operation counter.
//! - `manager`: activation, subscription ownership and the three operations.
//! - `supabase` / `memory`: concrete identity providers.

pub mod avatar;
mod clock;
pub mod config;
pub mod effects;
pub mod error;
pub mod manager;
pub mod memory;
pub mod provider;
pub mod store;
pub mod supabase;
pub mod types;

pub use effects::{Navigator, Notification, Notifier, Variant};
pub use error::ProviderError;
pub use manager::SessionManager;
pub use provider::{IdentityProvider, Subscription};
pub use store::SessionState;
pub use types::User;
