use super::*;

#[test]
fn initials_from_full_name() {
    assert_eq!(initials("Ada Lovelace"), "AL");
}

#[test]
fn initials_from_email() {
    assert_eq!(initials("ada@example.com"), "AE");
}

#[test]
fn initials_of_empty_label_is_empty() {
    assert_eq!(initials(""), "");
}
