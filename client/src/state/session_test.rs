use super::*;
use session::memory::{DEMO_EMAIL, DEMO_PASSWORD, MemoryProvider};
use session::{Navigator, Notification, Notifier};

struct Quiet;

impl Notifier for Quiet {
    fn notify(&self, _notification: Notification) {}
}

impl Navigator for Quiet {
    fn navigate(&self, _path: &str) {}
}

fn manager() -> Arc<SessionManager> {
    Arc::new(SessionManager::new(Arc::new(MemoryProvider::demo()), Arc::new(Quiet), Arc::new(Quiet)))
}

#[test]
#[should_panic(expected = "use_session() called outside a SessionProvider")]
fn use_session_outside_provider_panics() {
    let _ = use_session();
}

#[test]
#[should_panic(expected = "use_session() called outside a SessionProvider")]
fn use_session_in_owner_without_provider_panics() {
    let owner = Owner::new();
    owner.with(|| {
        let _ = use_session();
    });
}

#[test]
fn use_session_returns_provided_context() {
    let owner = Owner::new();
    owner.with(|| {
        let session = SessionContext::new(manager());
        provide_session(session);

        let found = use_session();
        assert_eq!(found.state().get_untracked(), SessionState::default());
        assert!(!found.loading());
        assert!(found.user().is_none());
    });
}

#[test]
fn child_owner_sees_parent_session() {
    let owner = Owner::new();
    owner.with(|| {
        provide_session(SessionContext::new(manager()));
        let child = Owner::current().unwrap().child();
        child.with(|| {
            assert!(use_session().user().is_none());
        });
    });
}

#[tokio::test]
async fn sync_copies_manager_state() {
    let owner = Owner::new();
    let manager = manager();
    let session = owner.with(|| SessionContext::new(Arc::clone(&manager)));

    manager.activate().await;
    manager.login(DEMO_EMAIL, DEMO_PASSWORD).await;
    assert!(session.state().get_untracked().user.is_none());

    session.sync();
    let mirrored = session.state().get_untracked();
    assert_eq!(mirrored, manager.state());
    assert_eq!(mirrored.user.map(|u| u.email), Some(DEMO_EMAIL.to_owned()));
}
