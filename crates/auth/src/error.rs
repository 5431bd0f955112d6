//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
///
/// Missing, malformed, tampered and expired credentials are deliberately
/// indistinguishable to the caller.
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    /// Authenticated identity does not match the requested resource owner
    IdentityMismatch,
    TokenIssueFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::IdentityMismatch => StatusCode::FORBIDDEN,
            AuthError::TokenIssueFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (code, message) = match self {
            AuthError::MissingToken | AuthError::InvalidToken => {
                ("UNAUTHORIZED", "unauthorized access")
            }
            AuthError::IdentityMismatch => ("FORBIDDEN", "forbidden access"),
            AuthError::TokenIssueFailed => ("TOKEN_ISSUE_FAILED", "Failed to issue session token"),
        };

        let body = Json(json!({
            "message": message,
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for solosphere_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::InvalidToken => {
                solosphere_common::Error::Authentication("unauthorized access".to_string())
            }
            AuthError::IdentityMismatch => {
                solosphere_common::Error::Authorization("forbidden access".to_string())
            }
            AuthError::TokenIssueFailed => {
                solosphere_common::Error::Internal("Failed to issue session token".to_string())
            }
        }
    }
}
