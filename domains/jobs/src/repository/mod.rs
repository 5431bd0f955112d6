//! Repository implementations for Jobs domain

pub mod jobs;
pub mod mock;

use async_trait::async_trait;
use solosphere_common::{DeleteResult, Document, InsertResult, RepositoryError, UpdateResult};
use uuid::Uuid;

use crate::domain::entities::{Job, JobFilter, JobQuery};

pub use jobs::JobRepository;

/// Storage operations over job documents.
///
/// Implemented by [`JobRepository`] (PostgreSQL) and
/// [`mock::MockJobStore`] (in-memory).
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Every job in insertion order
    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError>;

    async fn find(&self, id: Uuid) -> Result<Option<Job>, RepositoryError>;

    /// Store a new job under a fresh identifier
    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError>;

    /// Replace the document stored under `id`, creating it when absent
    async fn replace(&self, id: Uuid, document: Document)
        -> Result<UpdateResult, RepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<DeleteResult, RepositoryError>;

    /// Jobs whose `buyer.email` equals `email`
    async fn list_by_owner(&self, email: &str) -> Result<Vec<Job>, RepositoryError>;

    /// One page of the filtered, optionally sorted job list
    async fn list_paged(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError>;

    /// Number of jobs matching `filter`
    async fn count(&self, filter: &JobFilter) -> Result<i64, RepositoryError>;
}
