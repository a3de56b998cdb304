use super::*;
use session::User;

fn user() -> User {
    User { id: "u1".to_owned(), email: "a@b.com".to_owned(), name: Some("A B".to_owned()), avatar: None }
}

#[test]
fn should_redirect_unauth_when_not_loading_and_user_missing() {
    let state = SessionState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_while_loading() {
    let state = SessionState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn should_not_redirect_when_user_exists() {
    let state = SessionState { user: Some(user()), loading: false };
    assert!(!should_redirect_unauth(&state));
}
