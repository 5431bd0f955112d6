//! Job management API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use solosphere_auth::AuthUser;
use solosphere_common::{
    DeleteResult, InsertResult, JsonDocument, PageRequest, Result, UpdateResult,
};
use uuid::Uuid;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Job, JobFilter, JobQuery, SortOrder};

/// Query parameters for the paged job search
#[derive(Debug, Default, Deserialize)]
pub struct SearchJobsParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// Exact category
    pub filter: Option<String>,
    /// `asc` or anything else for descending
    pub sort: Option<String>,
    pub search: Option<String>,
}

impl SearchJobsParams {
    pub fn into_query(self) -> JobQuery {
        JobQuery {
            sort: SortOrder::from_param(self.sort.as_deref()),
            page: PageRequest::new(self.page, self.size),
            filter: JobFilter::new(self.search, self.filter),
        }
    }
}

/// Query parameters for counting jobs
#[derive(Debug, Default, Deserialize)]
pub struct CountJobsParams {
    pub filter: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: i64,
}

/// GET /jobs — Every job in insertion order
pub async fn list_jobs(State(state): State<JobsState>) -> Result<Json<Vec<Job>>> {
    let jobs = state.jobs.list_all().await?;
    Ok(Json(jobs))
}

/// GET /job/{id} — One job, or `null` when absent
pub async fn get_job(
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Option<Job>>> {
    let job = state.jobs.find(id).await?;
    Ok(Json(job))
}

/// POST /job — Store a new job posting
pub async fn create_job(
    State(state): State<JobsState>,
    JsonDocument(document): JsonDocument,
) -> Result<Json<InsertResult>> {
    let result = state.jobs.create(document).await?;

    tracing::info!(job_id = %result.inserted_id, "Job created");

    Ok(Json(result))
}

/// GET /jobs/{email} — Jobs posted by the authenticated buyer
pub async fn list_jobs_by_owner(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Job>>> {
    ctx.require_same_identity(&email)?;

    let jobs = state.jobs.list_by_owner(&email).await?;
    Ok(Json(jobs))
}

/// DELETE /job/{id} — Remove a job
///
/// Any authenticated user may delete unless strict ownership is enabled,
/// in which case only the buyer who posted it may.
pub async fn delete_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResult>> {
    if state.auth.strict_ownership() {
        if let Some(job) = state.jobs.find(id).await? {
            ctx.require_any_identity(&[job.owner_email()])?;
        }
    }

    let result = state.jobs.delete(id).await?;

    tracing::info!(
        job_id = %id,
        deleted = result.deleted_count,
        requested_by = %ctx.email(),
        "Job deleted"
    );

    Ok(Json(result))
}

/// PUT /job/{id} — Replace a job, creating it when the id is unknown
pub async fn replace_job(
    State(state): State<JobsState>,
    Path(id): Path<Uuid>,
    JsonDocument(document): JsonDocument,
) -> Result<Json<UpdateResult>> {
    let result = state.jobs.replace(id, document).await?;

    tracing::info!(
        job_id = %id,
        upserted = result.upserted_count,
        modified = result.modified_count,
        "Job replaced"
    );

    Ok(Json(result))
}

/// GET /allJobs — Paged, filtered and optionally sorted job search
pub async fn search_jobs(
    State(state): State<JobsState>,
    Query(params): Query<SearchJobsParams>,
) -> Result<Json<Vec<Job>>> {
    let query = params.into_query();
    let jobs = state.jobs.list_paged(&query).await?;
    Ok(Json(jobs))
}

/// GET /jobsCount — Number of jobs matching the search filter
pub async fn count_jobs(
    State(state): State<JobsState>,
    Query(params): Query<CountJobsParams>,
) -> Result<Json<CountResponse>> {
    let filter = JobFilter::new(params.search, params.filter);
    let count = state.jobs.count(&filter).await?;
    Ok(Json(CountResponse { count }))
}
