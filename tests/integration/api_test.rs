//! API endpoint integration tests
//!
//! Drives the composed router against in-memory stores: sessions, jobs,
//! bids and the ownership checks around them.

#![allow(dead_code)]

mod auth;
mod bids;
mod common;
mod jobs;
