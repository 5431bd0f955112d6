//! Jobs domain: job postings, owner listings, paged search

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Job, JobFilter, JobQuery, SortOrder};

// Re-export repository types
pub use repository::{mock::MockJobStore, JobRepository, JobStore};

// Re-export API types
pub use api::routes;
pub use api::JobsState;
