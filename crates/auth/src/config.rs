//! Authentication configuration

use solosphere_common::Config;

/// Authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_days: i64,
    /// Production cookies are `Secure; SameSite=None`, otherwise `SameSite=Strict`
    pub secure_cookies: bool,
    /// Apply ownership checks to every mutating or per-user endpoint
    pub strict_ownership: bool,
}

impl AuthConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            token_secret: config.access_token_secret.clone(),
            token_ttl_days: config.token_ttl_days,
            secure_cookies: config.production,
            strict_ownership: config.strict_ownership,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl_days", &self.token_ttl_days)
            .field("secure_cookies", &self.secure_cookies)
            .field("strict_ownership", &self.strict_ownership)
            .finish()
    }
}
