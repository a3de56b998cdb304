use super::*;
use crate::types::AuthEvent;
use std::sync::atomic::{AtomicUsize, Ordering};

fn counting_listener(counter: &Arc<AtomicUsize>) -> SessionListener {
    let counter = Arc::clone(counter);
    Arc::new(move |_change: &AuthChange| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn emit_reaches_every_listener() {
    let set = ListenerSet::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = set.subscribe(counting_listener(&hits));
    let _b = set.subscribe(counting_listener(&hits));

    set.emit(&AuthChange::new(AuthEvent::SignedOut, None));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(set.len(), 2);
}

#[test]
fn dropping_subscription_unregisters_listener() {
    let set = ListenerSet::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = set.subscribe(counting_listener(&hits));
    drop(sub);

    set.emit(&AuthChange::new(AuthEvent::SignedOut, None));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert!(set.is_empty());
}

#[test]
fn unsubscribe_releases_exactly_once() {
    let released = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&released);
    let sub = Subscription::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    sub.unsubscribe();
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_runs_release_once() {
    let released = Arc::new(AtomicUsize::new(0));
    {
        let counter = Arc::clone(&released);
        let _sub = Subscription::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
    }
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn subscription_outliving_registry_is_harmless() {
    let set = ListenerSet::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let sub = set.subscribe(counting_listener(&hits));
    drop(set);
    sub.unsubscribe();
}

#[test]
fn listener_may_unsubscribe_during_emit() {
    let set = ListenerSet::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let slot_in_listener = Arc::clone(&slot);
    let sub = set.subscribe(Arc::new(move |_change: &AuthChange| {
        slot_in_listener.lock().unwrap().take();
    }));
    *slot.lock().unwrap() = Some(sub);

    set.emit(&AuthChange::new(AuthEvent::SignedOut, None));
    assert!(set.is_empty());
}
