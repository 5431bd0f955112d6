//! Jobs domain state and auth backend integration

use axum::extract::FromRef;
use solosphere_auth::AuthBackend;
use std::sync::Arc;

use crate::repository::JobStore;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub jobs: Arc<dyn JobStore>,
    pub auth: AuthBackend,
}

impl JobsState {
    pub fn new(jobs: Arc<dyn JobStore>, auth: AuthBackend) -> Self {
        Self { jobs, auth }
    }
}

impl FromRef<JobsState> for AuthBackend {
    fn from_ref(state: &JobsState) -> Self {
        state.auth.clone()
    }
}
