//! Session endpoints
//!
//! Implements:
//! - POST /jwt — Issue a session cookie for the posted identity
//! - GET /logout — Clear the session cookie

use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use solosphere_common::ValidatedJson;

use crate::backend::AuthBackend;
use crate::claims::IdentityClaims;
use crate::error::AuthError;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// POST /jwt — Sign the posted identity and set it as the `token` cookie
pub async fn issue_session(
    State(auth): State<AuthBackend>,
    jar: CookieJar,
    ValidatedJson(claims): ValidatedJson<IdentityClaims>,
) -> Result<(CookieJar, Json<SessionResponse>), AuthError> {
    let email = claims.email.clone();
    let cookie = auth.start_session(claims)?;

    tracing::info!(email = %email, "Session issued");

    Ok((jar.add(cookie), Json(SessionResponse { success: true })))
}

/// GET /logout — Instruct the client to discard its session cookie
pub async fn end_session(
    State(auth): State<AuthBackend>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    (
        jar.add(auth.end_session()),
        Json(SessionResponse { success: true }),
    )
}

/// Session routes, mountable on any state that exposes an `AuthBackend`
pub fn routes<S>() -> Router<S>
where
    AuthBackend: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", get(end_session))
}
