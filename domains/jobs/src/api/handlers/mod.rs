//! HTTP handlers for the Jobs domain

pub mod jobs;
