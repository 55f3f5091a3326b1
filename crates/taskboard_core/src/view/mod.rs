//! Task view-model: filtering, status grouping and board projection.
//!
//! # Responsibility
//! - Turn a flat task collection into the status-partitioned board shown to users.
//!
//! # Invariants
//! - Every function here is pure and never mutates its input collection.

pub mod filter;
pub mod group;
pub mod projection;
