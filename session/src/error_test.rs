use super::*;

#[test]
fn rejected_message_is_shown_verbatim() {
    let err = ProviderError::rejected("Invalid login credentials");
    assert_eq!(err.user_message().as_deref(), Some("Invalid login credentials"));
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[test]
fn rejected_without_message_has_no_user_message() {
    let err = ProviderError::Rejected { status: Some(500), message: None };
    assert_eq!(err.user_message(), None);
    assert_eq!(err.to_string(), "identity service rejected the request");
    assert_eq!(err.status(), Some(500));
}

#[test]
fn blank_rejection_message_counts_as_missing() {
    let err = ProviderError::Rejected { status: Some(400), message: Some("   ".to_owned()) };
    assert_eq!(err.user_message(), None);
}

#[test]
fn transport_errors_describe_themselves() {
    let err = ProviderError::Transport("connection refused".to_owned());
    assert_eq!(err.user_message().as_deref(), Some("identity service request failed: connection refused"));
    assert_eq!(err.status(), None);
}
