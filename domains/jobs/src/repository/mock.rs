//! In-memory job store
//!
//! Keeps jobs in insertion order behind an `Arc<RwLock<>>`. Used by the
//! `memory` store provider and by router tests.

use async_trait::async_trait;
use solosphere_common::{DeleteResult, Document, InsertResult, RepositoryError, UpdateResult};
use std::cmp::Ordering;
use std::sync::{Arc, PoisonError, RwLock};
use uuid::Uuid;

use super::JobStore;
use crate::domain::entities::{Job, JobFilter, JobQuery, SortOrder};

#[derive(Debug, Clone, Default)]
pub struct MockJobStore {
    jobs: Arc<RwLock<Vec<Job>>>,
}

impl MockJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored job
    pub fn snapshot(&self) -> Vec<Job> {
        self.jobs
            .read()
            .map(|jobs| jobs.clone())
            .unwrap_or_default()
    }
}

fn poisoned<T>(err: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable(format!("jobs lock poisoned: {err}"))
}

/// Dateline order with missing values placed last in either direction
fn compare_dateline(a: &Job, b: &Job, order: SortOrder) -> Ordering {
    match (a.dateline(), b.dateline()) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.cmp(b),
            SortOrder::Descending => b.cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl JobStore for MockJobStore {
    async fn list_all(&self) -> Result<Vec<Job>, RepositoryError> {
        Ok(self.jobs.read().map_err(poisoned)?.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs.iter().find(|job| job.id == id).cloned())
    }

    async fn create(&self, document: Document) -> Result<InsertResult, RepositoryError> {
        let id = Uuid::new_v4();
        self.jobs
            .write()
            .map_err(poisoned)?
            .push(Job::new(id, document));
        Ok(InsertResult::new(id))
    }

    async fn replace(
        &self,
        id: Uuid,
        document: Document,
    ) -> Result<UpdateResult, RepositoryError> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        match jobs.iter_mut().find(|job| job.id == id) {
            Some(job) if job.document == document => Ok(UpdateResult::matched(false)),
            Some(job) => {
                job.document = document;
                Ok(UpdateResult::matched(true))
            }
            None => {
                jobs.push(Job::new(id, document));
                Ok(UpdateResult::upserted(id))
            }
        }
    }

    async fn delete(&self, id: Uuid) -> Result<DeleteResult, RepositoryError> {
        let mut jobs = self.jobs.write().map_err(poisoned)?;
        let before = jobs.len();
        jobs.retain(|job| job.id != id);
        Ok(DeleteResult::new((before - jobs.len()) as u64))
    }

    async fn list_by_owner(&self, email: &str) -> Result<Vec<Job>, RepositoryError> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs
            .iter()
            .filter(|job| job.is_owned_by(email))
            .cloned()
            .collect())
    }

    async fn list_paged(&self, query: &JobQuery) -> Result<Vec<Job>, RepositoryError> {
        let mut matched: Vec<Job> = {
            let jobs = self.jobs.read().map_err(poisoned)?;
            jobs.iter()
                .filter(|job| query.filter.matches(job))
                .cloned()
                .collect()
        };

        // Stable sort keeps insertion order among equal datelines
        if let Some(order) = query.sort {
            matched.sort_by(|a, b| compare_dateline(a, b, order));
        }

        Ok(matched
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.size() as usize)
            .collect())
    }

    async fn count(&self, filter: &JobFilter) -> Result<i64, RepositoryError> {
        let jobs = self.jobs.read().map_err(poisoned)?;
        Ok(jobs.iter().filter(|job| filter.matches(job)).count() as i64)
    }
}
