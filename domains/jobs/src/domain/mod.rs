//! Job domain types

pub mod entities;
