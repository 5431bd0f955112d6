//! Shared utilities, configuration, and error handling for SoloSphere
//!
//! This crate provides common functionality used across the marketplace server:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Free-form document helpers shared by the job and bid stores
//! - Pagination and validated JSON extractors

pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod extractors;

pub use config::{Config, StoreProvider};
pub use db::{DeleteResult, DocumentRow, InsertResult, RepositoryError, UpdateResult};
pub use document::Document;
pub use error::{Error, Result};
pub use extractors::{JsonDocument, PageRequest, ValidatedJson};
