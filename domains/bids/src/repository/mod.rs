//! Repository implementations for Bids domain

pub mod bids;
pub mod mock;

use async_trait::async_trait;
use solosphere_common::{Document, InsertResult, RepositoryError, UpdateResult};
use uuid::Uuid;

use crate::domain::entities::Bid;

pub use bids::BidRepository;

/// Storage operations over bid documents.
///
/// Implemented by [`BidRepository`] (PostgreSQL) and
/// [`mock::MockBidStore`] (in-memory).
#[async_trait]
pub trait BidStore: Send + Sync {
    /// Store a new bid.
    ///
    /// Fails with `RepositoryError::AlreadyExists` when the bidder already
    /// has a bid on the same job; nothing is written in that case.
    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<Bid>, RepositoryError>;

    /// Bids placed by `email`
    async fn list_by_bidder(&self, email: &str) -> Result<Vec<Bid>, RepositoryError>;

    /// Bids on jobs posted by `email`
    async fn list_by_job_owner(&self, email: &str) -> Result<Vec<Bid>, RepositoryError>;

    /// Overwrite the top-level fields present in `patch`
    async fn patch(&self, id: Uuid, patch: Document) -> Result<UpdateResult, RepositoryError>;
}
