//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates session access to
//! `use_session()` and shared chrome to `components`.

pub mod categories;
pub mod home;
pub mod login;
