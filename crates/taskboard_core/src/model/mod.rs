//! Task board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId` assigned by the store.
//! - There is no hard-delete state; tasks only move between statuses.

pub mod task;
