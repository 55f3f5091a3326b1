//! Core use-case services.
//!
//! # Responsibility
//! - Own board state and the task editor lifecycle.
//! - Keep presentation layers decoupled from store details.

pub mod board_state;
pub mod task_editor;
