//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components own the session wiring (provider, navigation bridge) and the
//! small pieces of session-aware chrome shared by pages.

pub mod navigation_bridge;
pub mod session_provider;
pub mod toast_stack;
pub mod user_badge;
