//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `toast`, `navigation`) so components
//! can depend on small focused models. `toast` and `navigation` are the
//! browser-side sinks the session manager reports into.

pub mod navigation;
pub mod session;
pub mod toast;
