use super::*;

#[test]
fn greeting_prefers_name_then_email() {
    let mut user = User { id: "u1".to_owned(), email: "a@b.com".to_owned(), name: Some("A B".to_owned()), avatar: None };
    assert_eq!(greeting(Some(&user)), "Welcome, A B");
    user.name = None;
    assert_eq!(greeting(Some(&user)), "Welcome, a@b.com");
}

#[test]
fn greeting_without_user_is_generic() {
    assert_eq!(greeting(None), "Welcome");
}

#[test]
fn category_slugs_are_unique() {
    let mut slugs: Vec<_> = CATEGORIES.iter().map(|c| c.slug).collect();
    slugs.sort_unstable();
    slugs.dedup();
    assert_eq!(slugs.len(), CATEGORIES.len());
}
