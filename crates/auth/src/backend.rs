//! Concrete authentication backend
//!
//! Wraps the token service and auth configuration. Domain states expose it
//! via `FromRef` so the extractors can find it:
//! ```ignore
//! impl FromRef<MyDomainState> for AuthBackend {
//!     fn from_ref(state: &MyDomainState) -> Self {
//!         state.auth.clone()
//!     }
//! }
//! ```

use axum_extra::extract::cookie::{Cookie, CookieJar};
use chrono::Duration;

use crate::claims::IdentityClaims;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::cookie::{removal_cookie, session_cookie, TOKEN_COOKIE};
use crate::error::AuthError;
use crate::token::TokenService;

#[derive(Clone, Debug)]
pub struct AuthBackend {
    tokens: TokenService,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        let tokens = TokenService::new(&config.token_secret, Duration::days(config.token_ttl_days));
        Self { tokens, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Whether ownership checks apply to every per-user or mutating endpoint
    pub fn strict_ownership(&self) -> bool {
        self.config.strict_ownership
    }

    /// Issue a token for `claims` and wrap it in the session cookie
    pub fn start_session(&self, claims: IdentityClaims) -> Result<Cookie<'static>, AuthError> {
        let token = self.tokens.issue(claims)?;
        Ok(session_cookie(token, &self.config))
    }

    /// Cookie instructing the client to drop its session
    pub fn end_session(&self) -> Cookie<'static> {
        removal_cookie(&self.config)
    }

    /// Authenticate the session cookie carried by a request.
    ///
    /// A missing cookie is rejected without touching the token service.
    pub fn authenticate(&self, jar: &CookieJar) -> Result<AuthContext, AuthError> {
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = self.tokens.verify(token)?;
        Ok(AuthContext::new(claims))
    }
}
