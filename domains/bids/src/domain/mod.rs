//! Bid domain types

pub mod entities;
