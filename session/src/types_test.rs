use super::*;

fn provider_user(full_name: Option<&str>) -> ProviderUser {
    ProviderUser {
        id: "u1".to_owned(),
        email: Some("a@b.com".to_owned()),
        user_metadata: UserMetadata { full_name: full_name.map(str::to_owned), avatar_url: None },
    }
}

#[test]
fn projection_copies_metadata_name_and_leaves_avatar_absent() {
    let user = User::from_provider(&provider_user(Some("A B")));
    assert_eq!(
        user,
        User { id: "u1".to_owned(), email: "a@b.com".to_owned(), name: Some("A B".to_owned()), avatar: None }
    );
}

#[test]
fn projection_of_phone_only_account_has_empty_email() {
    let mut raw = provider_user(None);
    raw.email = None;
    assert_eq!(User::from_provider(&raw).email, "");
}

#[test]
fn display_name_falls_back_to_email() {
    let user = User::from_provider(&provider_user(Some("  ")));
    assert_eq!(user.display_name(), "a@b.com");
    let named = User::from_provider(&provider_user(Some("A B")));
    assert_eq!(named.display_name(), "A B");
}

#[test]
fn provider_user_decodes_without_metadata() {
    let json = serde_json::json!({ "id": "u2", "email": "c@d.com" });
    let user: ProviderUser = serde_json::from_value(json).unwrap();
    assert_eq!(user.user_metadata, UserMetadata::default());
}

#[test]
fn expires_within_respects_margin() {
    let session = ProviderSession {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: Some(1_000),
        user: provider_user(None),
    };
    assert!(!session.expires_within(900, 60));
    assert!(session.expires_within(940, 60));
    assert!(session.expires_within(2_000, 60));
}

#[test]
fn session_without_expiry_never_expires() {
    let session = ProviderSession {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: None,
        user: provider_user(None),
    };
    assert!(!session.expires_within(i64::MAX, 60));
}

#[test]
fn sign_up_request_nests_metadata_under_data() {
    let req = SignUpRequest {
        credentials: Credentials { email: "a@b.com".to_owned(), password: "secret".to_owned() },
        metadata: UserMetadata { full_name: Some("A B".to_owned()), avatar_url: Some("https://x/y".to_owned()) },
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["email"], "a@b.com");
    assert_eq!(value["password"], "secret");
    assert_eq!(value["data"]["full_name"], "A B");
    assert_eq!(value["data"]["avatar_url"], "https://x/y");
}

#[test]
fn credentials_debug_redacts_password() {
    let creds = Credentials { email: "a@b.com".to_owned(), password: "hunter2".to_owned() };
    let rendered = format!("{creds:?}");
    assert!(rendered.contains("a@b.com"));
    assert!(!rendered.contains("hunter2"));
}

#[test]
fn auth_change_projects_user() {
    let session = ProviderSession {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        expires_at: None,
        user: provider_user(Some("A B")),
    };
    let change = AuthChange::new(AuthEvent::SignedIn, Some(session));
    assert_eq!(change.user().map(|u| u.id), Some("u1".to_owned()));
    assert_eq!(AuthChange::new(AuthEvent::SignedOut, None).user(), None);
}
