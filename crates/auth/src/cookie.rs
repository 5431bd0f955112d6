//! Session cookie construction

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::AuthConfig;

/// Name of the cookie carrying the session token
pub const TOKEN_COOKIE: &str = "token";

/// Cookie that stores `token` on the client
pub(crate) fn session_cookie(token: String, config: &AuthConfig) -> Cookie<'static> {
    build_cookie(token, config)
}

/// Cookie that tells the client to discard its session token immediately.
///
/// Carries the same attributes as the issued cookie so browsers match it.
pub(crate) fn removal_cookie(config: &AuthConfig) -> Cookie<'static> {
    let mut cookie = build_cookie(String::new(), config);
    cookie.make_removal();
    cookie
}

fn build_cookie(value: String, config: &AuthConfig) -> Cookie<'static> {
    let same_site = if config.secure_cookies {
        SameSite::None
    } else {
        SameSite::Strict
    };

    Cookie::build((TOKEN_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(same_site)
        .build()
}
