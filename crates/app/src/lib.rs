//! SoloSphere application composition root
//!
//! Selects the document store, then composes the session, job and bid
//! routers into a single application.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use solosphere_auth::{AuthBackend, AuthConfig};
use solosphere_bids::{BidRepository, BidStore, BidsState, MockBidStore};
use solosphere_common::{Config, StoreProvider};
use solosphere_jobs::{JobRepository, JobStore, JobsState, MockJobStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

/// Request bodies larger than this are rejected with 413
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Job and bid stores shared by every request
#[derive(Clone)]
pub struct Stores {
    pub jobs: Arc<dyn JobStore>,
    pub bids: Arc<dyn BidStore>,
    pool: Option<PgPool>,
}

impl Stores {
    /// In-memory stores, empty at startup
    pub fn memory() -> Self {
        Self {
            jobs: Arc::new(MockJobStore::new()),
            bids: Arc::new(MockBidStore::new()),
            pool: None,
        }
    }

    /// PostgreSQL-backed stores sharing one pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            jobs: Arc::new(JobRepository::new(pool.clone())),
            bids: Arc::new(BidRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Build the stores selected by `STORE_PROVIDER`.
    ///
    /// The postgres provider connects, then applies pending migrations.
    pub async fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        match config.store_provider {
            StoreProvider::Memory => {
                tracing::info!("Using in-memory document store");
                Ok(Self::memory())
            }
            StoreProvider::Postgres => {
                let database_url = config.database_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("DATABASE_URL is required for the postgres store provider")
                })?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.database_max_connections)
                    .connect(database_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("Database connection failed: {}", e))?;

                tracing::info!("Database connection established");

                sqlx::migrate!("../../migrations").run(&pool).await?;

                tracing::info!("Database migrations applied");

                Ok(Self::postgres(pool))
            }
        }
    }

    /// Close the database pool, if any
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

/// Create the main application router with all routes
pub fn create_app(config: &Config, stores: &Stores) -> Router {
    let auth = AuthBackend::new(AuthConfig::from_config(config));

    let jobs_state = JobsState::new(stores.jobs.clone(), auth.clone());
    let bids_state = BidsState::new(stores.bids.clone(), auth.clone());

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(|| async { "solo sphere server is running" }))
        .merge(solosphere_auth::routes().with_state(auth))
        .merge(solosphere_jobs::routes().with_state(jobs_state))
        .merge(solosphere_bids::routes().with_state(bids_state))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// CORS for the configured browser origins, with credentials so the
/// session cookie is sent cross-site
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(600))
}

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}
