//! UI side effects consumed by the session manager.
//!
//! The manager reports outcomes through a notification channel and moves the
//! user between views through a navigator; both are injected so the browser,
//! the CLI and tests can each supply their own.

/// Route the app lands on after a successful login.
pub const AUTHENTICATED_HOME: &str = "/insurance-categories";
/// Sign-in view shown after sign-up.
pub const SIGN_IN: &str = "/login";
/// Public landing view.
pub const ROOT: &str = "/";

/// Visual treatment of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Destructive,
}

/// User-facing feedback message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Option<Variant>,
}

impl Notification {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: None }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: Some(Variant::Destructive) }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == Some(Variant::Destructive)
    }
}

/// Sink for user-facing notifications (toasts, stderr lines, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Moves the application to another view.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}
