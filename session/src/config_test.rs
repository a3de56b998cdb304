use super::*;

/// # Safety
/// All env mutation happens inside the single test below, so no other test in
/// this binary races on these variables.
unsafe fn clear_identity_env() {
    unsafe {
        std::env::remove_var("SUPABASE_URL");
        std::env::remove_var("SUPABASE_ANON_KEY");
        std::env::remove_var("AUTH_REQUEST_TIMEOUT_SECS");
        std::env::remove_var("AUTH_CONNECT_TIMEOUT_SECS");
    }
}

#[test]
fn from_env_covers_defaults_overrides_and_failures() {
    unsafe { clear_identity_env() };
    assert!(matches!(IdentityConfig::from_env(), Err(ConfigError::MissingVar { var: "SUPABASE_URL" })));

    unsafe {
        std::env::set_var("SUPABASE_URL", "https://demo.supabase.co/");
        std::env::set_var("SUPABASE_ANON_KEY", "   ");
    }
    assert!(matches!(IdentityConfig::from_env(), Err(ConfigError::MissingVar { var: "SUPABASE_ANON_KEY" })));

    unsafe { std::env::set_var("SUPABASE_ANON_KEY", "anon") };
    let cfg = IdentityConfig::from_env().unwrap();
    assert_eq!(cfg.url, "https://demo.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
    assert_eq!(cfg.timeouts, AuthTimeouts::default());
    assert_eq!(cfg.auth_base(), "https://demo.supabase.co/auth/v1");

    unsafe {
        std::env::set_var("AUTH_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("AUTH_CONNECT_TIMEOUT_SECS", "2");
    }
    let cfg = IdentityConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts, AuthTimeouts { request_secs: 5, connect_secs: 2 });

    unsafe { std::env::set_var("AUTH_CONNECT_TIMEOUT_SECS", "0") };
    assert!(matches!(
        IdentityConfig::from_env(),
        Err(ConfigError::InvalidValue { var: "AUTH_CONNECT_TIMEOUT_SECS", .. })
    ));

    unsafe { clear_identity_env() };
}

#[test]
fn debug_output_redacts_anon_key() {
    let cfg = IdentityConfig::new("https://demo.supabase.co", "super-secret");
    let rendered = format!("{cfg:?}");
    assert!(rendered.contains("demo.supabase.co"));
    assert!(!rendered.contains("super-secret"));
}
