//! Task store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store contract consumed by the editor and board state.
//! - Isolate SQLite query details from view/editor logic.
//!
//! # Invariants
//! - Store writes must enforce `TaskInput::validate()` before persistence.
//! - Store APIs return semantic errors (`NotFound`, `InvalidData`) in addition
//!   to DB transport errors.

pub mod task_store;
