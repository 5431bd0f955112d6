//! Bids domain: bid placement, duplicate guard, status changes

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Bid, DUPLICATE_BID_MESSAGE};

// Re-export repository types
pub use repository::{mock::MockBidStore, BidRepository, BidStore};

// Re-export API types
pub use api::routes;
pub use api::BidsState;
