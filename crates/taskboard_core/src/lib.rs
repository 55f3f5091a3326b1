//! Core domain logic for the task board.
//! This crate owns the task view-model, the editor lifecycle and the store contract.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Task, TaskId, TaskInput, TaskPriority, TaskStatus, TaskValidationError, UnknownVariantError,
};
pub use repo::task_store::{SqliteTaskStore, StoreError, StoreResult, TaskStore};
pub use service::board_state::BoardState;
pub use service::task_editor::{
    EditorError, EditorMode, EditorPhase, OpenTarget, SaveKind, SavedTask, SubmitOutcome,
    SubmitRequest, TaskEditor, TaskForm,
};
pub use view::filter::{filter_tasks, FilterCriteria};
pub use view::group::{group_by_status, StatusGroups};
pub use view::projection::{project_board, BoardColumn, BoardView, TaskCard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
