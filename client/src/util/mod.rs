//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Effects that couple session state to the router live here so pages stay
//! declarative.

pub mod auth;
pub mod navigation;
