//! Scope that owns the session manager for its subtree.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything below `<SessionProvider>` may call `use_session()`. The manager
//! is activated when the provider mounts and deactivated when it is cleaned
//! up, which releases the identity-provider subscription exactly once.

use std::sync::Arc;

use leptos::prelude::*;
use session::SessionManager;

use crate::state::session::{SessionContext, provide_session};

#[component]
pub fn SessionProvider(manager: Arc<SessionManager>, children: Children) -> impl IntoView {
    let session = SessionContext::new(Arc::clone(&manager));
    provide_session(session);

    #[cfg(feature = "csr")]
    session.start();

    on_cleanup(move || manager.deactivate());

    children()
}
