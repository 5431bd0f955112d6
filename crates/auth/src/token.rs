//! Session token issuing and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{IdentityClaims, SessionClaims};
use crate::error::AuthError;

/// Signs and verifies HS256 session tokens.
///
/// Tokens are self-contained; nothing is stored server-side, so a token stays
/// valid until it expires. Logging out only tells the client to drop it.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    #[mutants::skip] // Debug output only, keys are never printed
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign `claims` into a token valid for the configured lifetime
    pub fn issue(&self, claims: IdentityClaims) -> Result<String, AuthError> {
        self.issue_at(claims, Utc::now())
    }

    /// Sign `claims` as if issued at `issued_at`
    pub fn issue_at(
        &self,
        claims: IdentityClaims,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expires_at = issued_at + self.ttl;
        let session = SessionClaims {
            identity: claims.without_reserved(),
            iat: issued_at.timestamp().max(0) as u64,
            exp: expires_at.timestamp().max(0) as u64,
        };

        encode(&Header::new(Algorithm::HS256), &session, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign session token");
            AuthError::TokenIssueFailed
        })
    }

    /// Check signature and expiry, returning the identity the token was
    /// issued for.
    ///
    /// Malformed, tampered and expired tokens all produce
    /// `AuthError::InvalidToken`.
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!(error = %e, "Session token validation failed");
                AuthError::InvalidToken
            })?;

        Ok(token_data.claims.identity)
    }
}
