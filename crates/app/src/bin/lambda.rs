//! SoloSphere API - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solosphere_app::{body_limit_layer, build_cors_layer, create_app, Stores};
use solosphere_common::config::{Config, DEFAULT_LOG_FILTER};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .json()
        .without_time()
        .init();

    info!("Initializing SoloSphere API Lambda");

    let config =
        Config::from_env().map_err(|e| Error::from(format!("Configuration error: {}", e)))?;

    let stores = Stores::from_config(&config)
        .await
        .map_err(|e| Error::from(format!("Store initialization error: {}", e)))?;

    let app = create_app(&config, &stores)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&config.cors_allowed_origins))
        .layer(body_limit_layer());

    info!("SoloSphere API Lambda ready to serve requests");

    run(app).await
}
