//! Route definitions for Bids domain API

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::handlers::bids;
use super::middleware::BidsState;

/// Create all Bids domain API routes
pub fn routes() -> Router<BidsState> {
    Router::new()
        .route("/bid", post(bids::create_bid))
        .route("/bid/{id}", patch(bids::patch_bid))
        .route("/myBid/{email}", get(bids::list_my_bids))
        .route("/bidRequests/{email}", get(bids::list_bid_requests))
}
