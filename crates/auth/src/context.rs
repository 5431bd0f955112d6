//! Authorization context for authenticated users

use crate::claims::IdentityClaims;
use crate::error::AuthError;

/// Represents an authenticated session
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub claims: IdentityClaims,
}

impl AuthContext {
    pub fn new(claims: IdentityClaims) -> Self {
        Self { claims }
    }

    /// Email the session was issued for
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// Allow only when the session subject equals `owner_email`.
    ///
    /// This compares against the email the caller asked about (usually a
    /// path parameter). It does not look at any stored record, so handlers
    /// must still filter their query by that same email.
    pub fn require_same_identity(&self, owner_email: &str) -> Result<(), AuthError> {
        if self.email() == owner_email {
            Ok(())
        } else {
            tracing::warn!(
                subject = %self.email(),
                requested = %owner_email,
                "Identity mismatch"
            );
            Err(AuthError::IdentityMismatch)
        }
    }

    /// Allow when the session subject equals any of `parties`.
    ///
    /// Absent parties never match.
    pub fn require_any_identity(&self, parties: &[Option<&str>]) -> Result<(), AuthError> {
        if parties.iter().flatten().any(|party| *party == self.email()) {
            Ok(())
        } else {
            tracing::warn!(subject = %self.email(), "Subject is not a party to the resource");
            Err(AuthError::IdentityMismatch)
        }
    }
}
