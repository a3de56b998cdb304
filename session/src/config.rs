//! Identity-service configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    MissingVar { var: &'static str },
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for AuthTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_AUTH_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_AUTH_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Project URL without trailing slash, e.g. `https://abc.supabase.co`.
    pub url: String,
    /// Public anon key sent as `apikey` on every request.
    pub anon_key: String,
    pub timeouts: AuthTimeouts,
}

impl std::fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("timeouts", &self.timeouts)
            .finish()
    }
}

impl IdentityConfig {
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self {
            url: url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.to_owned(),
            timeouts: AuthTimeouts::default(),
        }
    }

    /// Build typed identity config from environment variables.
    ///
    /// Required:
    /// - `SUPABASE_URL`
    /// - `SUPABASE_ANON_KEY`
    ///
    /// Optional:
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or empty, or a
    /// timeout is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = required_var("SUPABASE_URL")?;
        let anon_key = required_var("SUPABASE_ANON_KEY")?;
        let timeouts = AuthTimeouts {
            request_secs: env_parse_secs("AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_AUTH_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_secs("AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_AUTH_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { timeouts, ..Self::new(&url, &anon_key) })
    }

    /// Base URL of the auth REST API.
    #[must_use]
    pub fn auth_base(&self) -> String {
        format!("{}/auth/v1", self.url)
    }
}

fn required_var(var: &'static str) -> Result<String, ConfigError> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingVar { var })
}

fn env_parse_secs(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    let Ok(raw) = std::env::var(var) else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::InvalidValue { var, value: raw }),
    }
}
