//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables once at startup.
//! There is no hot reload.

use anyhow::Result;
use std::env;
use std::fmt;
use std::str::FromStr;

/// Default listening port
const DEFAULT_PORT: u16 = 5000;

/// Default session credential lifetime
const DEFAULT_TOKEN_TTL_DAYS: i64 = 365;

/// Default pool size for the Postgres store
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default frontend origin allowed by CORS
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Tracing filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "solosphere=debug,tower_http=info";

/// Backing store for jobs and bids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreProvider {
    /// PostgreSQL, one JSONB document per row
    Postgres,
    /// Process-local store, contents are lost on restart
    Memory,
}

impl FromStr for StoreProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreProvider::Postgres),
            "memory" | "mock" => Ok(StoreProvider::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown store provider: {}. Supported providers: postgres, memory",
                other
            )),
        }
    }
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreProvider::Postgres => write!(f, "postgres"),
            StoreProvider::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    /// Listening port
    pub port: u16,

    /// Signing secret for session credentials
    pub access_token_secret: String,

    /// Production mode switches the session cookie to `Secure; SameSite=None`
    pub production: bool,

    /// Store backend
    pub store_provider: StoreProvider,

    /// Database connection URL, required for the Postgres store
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    /// Origins allowed to send credentialed cross-site requests
    pub cors_allowed_origins: Vec<String>,

    /// Session credential lifetime in days
    pub token_ttl_days: i64,

    /// Apply ownership checks to delete-job, patch-bid and list-bids-by-bidder
    pub strict_ownership: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("access_token_secret", &"[REDACTED]")
            .field("production", &self.production)
            .field("store_provider", &self.store_provider)
            .field("database_url", &self.database_url.as_ref().map(|_| "[REDACTED]"))
            .field("database_max_connections", &self.database_max_connections)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("token_ttl_days", &self.token_ttl_days)
            .field("strict_ownership", &self.strict_ownership)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let access_token_secret = lookup("ACCESS_TOKEN_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("ACCESS_TOKEN_SECRET is required"))?;

        let store_provider = match lookup("STORE_PROVIDER") {
            Some(value) => value.parse()?,
            None => StoreProvider::Postgres,
        };

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());
        if store_provider == StoreProvider::Postgres && database_url.is_none() {
            return Err(anyhow::anyhow!(
                "DATABASE_URL is required for the postgres store"
            ));
        }

        let environment = lookup("NODE_ENV")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let token_ttl_days = parse_or(lookup("TOKEN_TTL_DAYS"), DEFAULT_TOKEN_TTL_DAYS)?;
        if token_ttl_days <= 0 {
            return Err(anyhow::anyhow!("TOKEN_TTL_DAYS must be positive"));
        }

        Ok(Self {
            port: parse_or(lookup("PORT"), DEFAULT_PORT)?,
            access_token_secret,
            production: environment.eq_ignore_ascii_case("production"),
            store_provider,
            database_url,
            database_max_connections: parse_or(
                lookup("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            cors_allowed_origins,
            token_ttl_days,
            strict_ownership: lookup("STRICT_OWNERSHIP")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value {:?}: {}", raw, e)),
        None => Ok(default),
    }
}
