//! Bids domain state and auth backend integration

use axum::extract::FromRef;
use solosphere_auth::AuthBackend;
use std::sync::Arc;

use crate::repository::BidStore;

/// Application state for the Bids domain
#[derive(Clone)]
pub struct BidsState {
    pub bids: Arc<dyn BidStore>,
    pub auth: AuthBackend,
}

impl BidsState {
    pub fn new(bids: Arc<dyn BidStore>, auth: AuthBackend) -> Self {
        Self { bids, auth }
    }
}

impl FromRef<BidsState> for AuthBackend {
    fn from_ref(state: &BidsState) -> Self {
        state.auth.clone()
    }
}
