//! Deterministic avatar URLs for new accounts.

/// Avatar generation endpoint; the account email is passed as the seed.
pub const AVATAR_ENDPOINT: &str = "https://api.dicebear.com/7.x/avataaars/svg";

/// Avatar URL derived from `email`. The same email always yields the same URL.
#[must_use]
pub fn avatar_url(email: &str) -> String {
    reqwest::Url::parse_with_params(AVATAR_ENDPOINT, &[("seed", email)])
        .map_or_else(|_| format!("{AVATAR_ENDPOINT}?seed={email}"), String::from)
}
