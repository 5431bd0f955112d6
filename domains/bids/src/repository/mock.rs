//! In-memory bid store
//!
//! Same duplicate guard as the PostgreSQL repository. The check and the
//! insert happen under one write lock, so concurrent duplicates cannot race.

use async_trait::async_trait;
use solosphere_common::document::merge_top_level;
use solosphere_common::{Document, InsertResult, RepositoryError, UpdateResult};
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use super::BidStore;
use crate::domain::entities::Bid;

#[derive(Debug, Clone, Default)]
pub struct MockBidStore {
    bids: Arc<RwLock<Vec<Bid>>>,
}

impl MockBidStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored bid
    pub fn snapshot(&self) -> Vec<Bid> {
        self.bids
            .read()
            .map(|bids| bids.clone())
            .unwrap_or_default()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable(format!("bids lock poisoned: {err}"))
}

#[async_trait]
impl BidStore for MockBidStore {
    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError> {
        let mut bids = self.bids.write().map_err(poisoned)?;
        if bids.iter().any(|bid| bid.duplicates(&document)) {
            return Err(RepositoryError::AlreadyExists);
        }

        let id = Uuid::new_v4();
        bids.push(Bid::new(id, document));
        Ok(InsertResult::new(id))
    }

    async fn find(&self, id: Uuid) -> Result<Option<Bid>, RepositoryError> {
        let bids = self.bids.read().map_err(poisoned)?;
        Ok(bids.iter().find(|bid| bid.id == id).cloned())
    }

    async fn list_by_bidder(&self, email: &str) -> Result<Vec<Bid>, RepositoryError> {
        let bids = self.bids.read().map_err(poisoned)?;
        Ok(bids
            .iter()
            .filter(|bid| bid.bidder_email() == Some(email))
            .cloned()
            .collect())
    }

    async fn list_by_job_owner(&self, email: &str) -> Result<Vec<Bid>, RepositoryError> {
        let bids = self.bids.read().map_err(poisoned)?;
        Ok(bids
            .iter()
            .filter(|bid| bid.job_owner_email() == Some(email))
            .cloned()
            .collect())
    }

    async fn patch(&self, id: Uuid, patch: Document) -> Result<UpdateResult, RepositoryError> {
        let mut bids = self.bids.write().map_err(poisoned)?;
        let Some(index) = bids.iter().position(|bid| bid.id == id) else {
            return Ok(UpdateResult::unmatched());
        };

        let mut patched = bids[index].document.clone();
        if !merge_top_level(&mut patched, patch) {
            return Ok(UpdateResult::matched(false));
        }

        // A patch may not turn this bid into a duplicate of another one
        let collides = bids
            .iter()
            .enumerate()
            .any(|(i, other)| i != index && other.duplicates(&patched));
        if collides {
            return Err(RepositoryError::AlreadyExists);
        }

        bids[index].document = patched;
        Ok(UpdateResult::matched(true))
    }
}
