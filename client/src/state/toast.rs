//! Toast queue fed by the session manager's notifications.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use leptos::prelude::*;
use session::{Notification, Notifier};

/// How long a toast stays on screen before it is dismissed automatically.
pub const TOAST_DURATION_MS: u32 = 5_000;
/// Older toasts are dropped once this many are visible.
pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a notification and return its toast id.
    pub fn push(&mut self, notification: Notification) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast { id, notification });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    /// Remove a toast. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }
}

/// `Notifier` that renders notifications as toasts.
#[derive(Clone, Copy)]
pub struct SignalNotifier {
    toasts: RwSignal<ToastState>,
}

impl SignalNotifier {
    pub fn new(toasts: RwSignal<ToastState>) -> Self {
        Self { toasts }
    }
}

impl Notifier for SignalNotifier {
    fn notify(&self, notification: Notification) {
        let Some(id) = self.toasts.try_update(|state| state.push(notification)) else {
            tracing::debug!("toast dropped: toast state disposed");
            return;
        };
        #[cfg(feature = "csr")]
        {
            let toasts = self.toasts;
            gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || {
                toasts.try_update(|state| state.dismiss(id));
            })
            .forget();
        }
        #[cfg(not(feature = "csr"))]
        let _ = id;
    }
}
