//! Sequenced session state.
//!
//! DESIGN
//! ======
//! Two kinds of writers race for the user slot: request completions (initial
//! fetch, logout) and session-change events. Each writer takes a ticket from
//! a monotonically increasing counter at the moment it starts (request) or is
//! observed (event). A write lands only when its ticket is newer than the last
//! applied one, so a slow request can never clobber a newer event.
//!
//! `loading` is derived from the number of outstanding operations rather than
//! toggled by each writer, which keeps it true for exactly as long as any
//! fetch or credential call is in flight.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::{Mutex, PoisonError};

use tokio::sync::watch;

use crate::types::User;

/// Snapshot of the session as exposed to consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
}

/// Ordering token for a pending write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
struct Ledger {
    issued: u64,
    applied: u64,
    pending: usize,
    closed: bool,
}

/// Shared session state plus its write ledger.
#[derive(Debug)]
pub struct SessionStore {
    ledger: Mutex<Ledger>,
    state: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { ledger: Mutex::new(Ledger::default()), state }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every published state change.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Take the next ordering ticket.
    pub fn ticket(&self) -> Ticket {
        let mut ledger = self.lock();
        ledger.issued += 1;
        Ticket(ledger.issued)
    }

    /// Mark an operation outstanding until the returned guard drops.
    pub fn begin(&self) -> Pending<'_> {
        let mut ledger = self.lock();
        ledger.pending += 1;
        self.publish_loading(&ledger);
        Pending { store: self }
    }

    /// Write `user` if `ticket` is newer than the last applied write.
    ///
    /// Returns `false` when the write was stale or the store is closed.
    pub fn apply(&self, ticket: Ticket, user: Option<User>) -> bool {
        let mut ledger = self.lock();
        if ledger.closed {
            return false;
        }
        if ticket.0 <= ledger.applied {
            tracing::debug!(ticket = ticket.0, applied = ledger.applied, "stale session write dropped");
            return false;
        }
        ledger.applied = ticket.0;
        let loading = ledger.pending > 0;
        self.state.send_if_modified(|state| {
            let changed = state.user != user || state.loading != loading;
            state.user = user;
            state.loading = loading;
            changed
        });
        true
    }

    /// Take a ticket and apply in one step, for writers observed "now".
    pub fn apply_now(&self, user: Option<User>) -> bool {
        let ticket = self.ticket();
        self.apply(ticket, user)
    }

    /// Stop accepting writes. Outstanding guards still settle `loading`.
    pub fn close(&self) {
        self.lock().closed = true;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn finish(&self) {
        let mut ledger = self.lock();
        ledger.pending = ledger.pending.saturating_sub(1);
        self.publish_loading(&ledger);
    }

    fn publish_loading(&self, ledger: &Ledger) {
        let loading = ledger.pending > 0;
        self.state.send_if_modified(|state| {
            if state.loading == loading {
                return false;
            }
            state.loading = loading;
            true
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Outstanding-operation guard; dropping it settles `loading`.
#[must_use = "the operation counts as finished as soon as the guard drops"]
#[derive(Debug)]
pub struct Pending<'a> {
    store: &'a SessionStore,
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        self.store.finish();
    }
}
