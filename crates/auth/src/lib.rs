//! Session authentication for the SoloSphere API
//!
//! Issues and verifies the signed `token` cookie, and provides axum
//! extractors that work with any domain state implementing `FromRef<S>` for
//! `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod cookie;
mod error;
mod extractors;
mod session;
mod token;

pub use backend::AuthBackend;
pub use claims::{IdentityClaims, SessionClaims};
pub use config::AuthConfig;
pub use context::AuthContext;
pub use cookie::TOKEN_COOKIE;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use session::{routes, SessionResponse};
pub use token::TokenService;
