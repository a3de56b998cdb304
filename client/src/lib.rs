//! # client
//!
//! Leptos + WASM front-end for the insurance assistant.
//!
//! The `session` crate owns the auth lifecycle; this crate adapts it to the
//! reactive graph. `SessionProvider` scopes a `SessionManager` to the view
//! tree, toasts and route changes requested by the manager flow back through
//! `state::toast` and `state::navigation`, and pages read the session through
//! `use_session()`.

pub mod app;
pub mod components;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init only happens when the module is re-instantiated.
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
