//! Bid API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use solosphere_auth::AuthUser;
use solosphere_common::{Error, InsertResult, JsonDocument, RepositoryError, Result, UpdateResult};
use uuid::Uuid;

use crate::api::middleware::BidsState;
use crate::domain::entities::{Bid, DUPLICATE_BID_MESSAGE};

/// Report a duplicate (`email`, `jobId`) pair with the bid-specific message
fn duplicate_as_bad_request(err: RepositoryError) -> Error {
    match err {
        RepositoryError::AlreadyExists => {
            tracing::info!("Duplicate bid rejected");
            Error::Duplicate(DUPLICATE_BID_MESSAGE.to_string())
        }
        other => other.into(),
    }
}

/// POST /bid — Place a bid
pub async fn create_bid(
    State(state): State<BidsState>,
    JsonDocument(document): JsonDocument,
) -> Result<Json<InsertResult>> {
    let result = state
        .bids
        .create(document)
        .await
        .map_err(duplicate_as_bad_request)?;

    tracing::info!(bid_id = %result.inserted_id, "Bid created");

    Ok(Json(result))
}

/// PATCH /bid/{id} — Overwrite top-level bid fields, typically `status`
///
/// Open to anyone unless strict ownership is enabled, in which case the
/// caller must be the bidder or the owner of the job.
pub async fn patch_bid(
    State(state): State<BidsState>,
    jar: CookieJar,
    Path(id): Path<Uuid>,
    JsonDocument(patch): JsonDocument,
) -> Result<Json<UpdateResult>> {
    if state.auth.strict_ownership() {
        let ctx = state.auth.authenticate(&jar)?;
        if let Some(bid) = state.bids.find(id).await? {
            ctx.require_any_identity(&[bid.bidder_email(), bid.job_owner_email()])?;
        }
    }

    let result = state
        .bids
        .patch(id, patch)
        .await
        .map_err(duplicate_as_bad_request)?;

    tracing::info!(
        bid_id = %id,
        matched = result.matched_count,
        modified = result.modified_count,
        "Bid patched"
    );

    Ok(Json(result))
}

/// GET /myBid/{email} — Bids placed by a bidder
pub async fn list_my_bids(
    AuthUser(ctx): AuthUser,
    State(state): State<BidsState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Bid>>> {
    if state.auth.strict_ownership() {
        ctx.require_same_identity(&email)?;
    }

    let bids = state.bids.list_by_bidder(&email).await?;
    Ok(Json(bids))
}

/// GET /bidRequests/{email} — Bids received on the caller's jobs
pub async fn list_bid_requests(
    AuthUser(ctx): AuthUser,
    State(state): State<BidsState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Bid>>> {
    ctx.require_same_identity(&email)?;

    let bids = state.bids.list_by_job_owner(&email).await?;
    Ok(Json(bids))
}
