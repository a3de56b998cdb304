use super::*;
use std::sync::Arc;

fn creds(email: &str, password: &str) -> Credentials {
    Credentials { email: email.to_owned(), password: password.to_owned() }
}

fn sign_up_request(email: &str, password: &str) -> SignUpRequest {
    SignUpRequest {
        credentials: creds(email, password),
        metadata: UserMetadata { full_name: Some("A B".to_owned()), avatar_url: None },
    }
}

fn recording_listener(events: &Arc<Mutex<Vec<AuthEvent>>>) -> SessionListener {
    let events = Arc::clone(events);
    Arc::new(move |change: &AuthChange| events.lock().unwrap().push(change.event))
}

#[tokio::test]
async fn sign_in_with_seeded_account_emits_signed_in() {
    let provider = MemoryProvider::new();
    provider.register("A@B.com", "secret", Some("A B"));
    let events = Arc::new(Mutex::new(Vec::new()));
    let _sub = provider.on_session_change(recording_listener(&events));

    provider.sign_in_with_password(creds("a@b.com", "secret")).await.unwrap();

    let session = provider.get_session().await.unwrap().unwrap();
    assert_eq!(session.user.email.as_deref(), Some("a@b.com"));
    assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("A B"));
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::InitialSession, AuthEvent::SignedIn]);
}

#[tokio::test]
async fn wrong_password_is_rejected_with_service_message() {
    let provider = MemoryProvider::new();
    provider.register("a@b.com", "secret", None);

    let err = provider.sign_in_with_password(creds("a@b.com", "nope")).await.unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some(INVALID_CREDENTIALS));
    assert_eq!(err.status(), Some(400));
    assert!(provider.current_session().is_none());
}

#[tokio::test]
async fn unknown_account_is_rejected_like_wrong_password() {
    let provider = MemoryProvider::new();
    let err = provider.sign_in_with_password(creds("ghost@b.com", "secret")).await.unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some(INVALID_CREDENTIALS));
}

#[tokio::test]
async fn sign_up_requires_confirmation_before_sign_in() {
    let provider = MemoryProvider::new();
    provider.sign_up(sign_up_request("new@b.com", "secret")).await.unwrap();
    assert!(provider.current_session().is_none());

    let err = provider.sign_in_with_password(creds("new@b.com", "secret")).await.unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some(EMAIL_NOT_CONFIRMED));

    assert!(provider.confirm("new@b.com"));
    provider.sign_in_with_password(creds("new@b.com", "secret")).await.unwrap();
    assert!(provider.current_session().is_some());
}

#[tokio::test]
async fn auto_confirm_sign_up_starts_a_session() {
    let provider = MemoryProvider::with_auto_confirm();
    provider.sign_up(sign_up_request("new@b.com", "secret")).await.unwrap();
    let session = provider.current_session().unwrap();
    assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("A B"));
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected() {
    let provider = MemoryProvider::new();
    provider.register("a@b.com", "secret", None);
    let err = provider.sign_up(sign_up_request("A@b.com", "secret")).await.unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some(ALREADY_REGISTERED));
}

#[tokio::test]
async fn short_password_is_rejected_at_sign_up() {
    let provider = MemoryProvider::new();
    let err = provider.sign_up(sign_up_request("a@b.com", "12345")).await.unwrap_err();
    assert_eq!(err.user_message().as_deref(), Some(WEAK_PASSWORD));
}

#[tokio::test]
async fn sign_out_clears_session_and_emits_signed_out() {
    let provider = MemoryProvider::new();
    provider.register("a@b.com", "secret", None);
    provider.sign_in_with_password(creds("a@b.com", "secret")).await.unwrap();
    let events = Arc::new(Mutex::new(Vec::new()));
    let _sub = provider.on_session_change(recording_listener(&events));

    provider.sign_out().await.unwrap();
    provider.sign_out().await.unwrap();

    assert!(provider.current_session().is_none());
    assert_eq!(
        *events.lock().unwrap(),
        vec![AuthEvent::InitialSession, AuthEvent::SignedOut, AuthEvent::SignedOut]
    );
}

#[tokio::test]
async fn released_listener_stops_receiving() {
    let provider = MemoryProvider::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sub = provider.on_session_change(recording_listener(&events));
    assert_eq!(provider.listener_count(), 1);
    sub.unsubscribe();
    assert_eq!(provider.listener_count(), 0);

    provider.sign_out().await.unwrap();
    assert_eq!(*events.lock().unwrap(), vec![AuthEvent::InitialSession]);
}

#[tokio::test]
async fn manager_over_memory_provider_follows_sign_in_event() {
    use crate::effects::{Navigator, Notification, Notifier};
    use crate::manager::SessionManager;

    struct Quiet;
    impl Notifier for Quiet {
        fn notify(&self, _notification: Notification) {}
    }
    impl Navigator for Quiet {
        fn navigate(&self, _path: &str) {}
    }

    let provider = Arc::new(MemoryProvider::new());
    provider.register("a@b.com", "secret", Some("A B"));
    let manager = SessionManager::new(provider.clone(), Arc::new(Quiet), Arc::new(Quiet));
    manager.activate().await;
    assert!(manager.user().is_none());

    manager.login("a@b.com", "secret").await;
    let user = manager.user().unwrap();
    assert_eq!(user.name.as_deref(), Some("A B"));

    manager.logout().await;
    assert!(manager.user().is_none());
}

#[tokio::test]
async fn demo_provider_accepts_demo_credentials() {
    let provider = MemoryProvider::demo();
    provider.sign_in_with_password(creds(DEMO_EMAIL, DEMO_PASSWORD)).await.unwrap();
    let session = provider.current_session().unwrap();
    assert_eq!(session.user.user_metadata.full_name.as_deref(), Some("Demo User"));
}

#[tokio::test]
async fn account_ids_stay_unique_after_re_registering_an_email() {
    let provider = MemoryProvider::with_auto_confirm();
    let first = provider.register("a@b.com", "secret", None);
    let second = provider.register("a@b.com", "secret2", None);
    assert_ne!(first, second);

    provider.sign_up(sign_up_request("new@b.com", "secret")).await.unwrap();
    let new_id = provider.current_session().unwrap().user.id;
    assert_ne!(new_id, first);
    assert_ne!(new_id, second);
}
