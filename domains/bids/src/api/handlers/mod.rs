//! HTTP handlers for the Bids domain

pub mod bids;
