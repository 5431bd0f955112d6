//! Session claim types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Registered claims managed by the token service. Caller-supplied values
/// for these keys are discarded on issue.
pub(crate) const RESERVED_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Identity a client presents when requesting a session.
///
/// `email` identifies the user for ownership checks. Any other keys the
/// client sends (display name, photo URL, ...) are carried in the token and
/// returned unchanged on verification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IdentityClaims {
    #[validate(email)]
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdentityClaims {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            extra: Map::new(),
        }
    }

    pub(crate) fn without_reserved(mut self) -> Self {
        for key in RESERVED_CLAIMS {
            self.extra.remove(key);
        }
        self
    }
}

/// Signed token payload: identity plus issue and expiry timestamps
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(flatten)]
    pub identity: IdentityClaims,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
}
