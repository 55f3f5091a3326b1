//! Board state container.
//!
//! # Responsibility
//! - Own the in-memory task collection and the current filter selection.
//! - Merge saved tasks from the editor and reload from the store.
//!
//! # Invariants
//! - This container is the only writer of the task collection.
//! - A failed reload keeps the previous collection and records `load_error`.
//! - After a merge each task id appears at most once.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::repo::task_store::{StoreResult, TaskStore};
use crate::service::task_editor::{SaveKind, SavedTask, SubmitOutcome, TaskEditor};
use crate::view::filter::FilterCriteria;
use crate::view::projection::{project_board, BoardView};
use log::{error, info, warn};
use std::time::Instant;

/// Owned task collection plus filter selection for one board.
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
    criteria: FilterCriteria,
    loaded: bool,
    load_error: Option<String>,
}

impl BoardState {
    /// Empty board that has not been loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board seeded with an already-fetched collection.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            loaded: true,
            ..Self::default()
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// True until the first successful or failed load completes.
    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Replaces the collection with the store's current contents.
    ///
    /// # Errors
    /// Returns the store error after logging it; the previous collection stays.
    pub fn reload<S: TaskStore + ?Sized>(&mut self, store: &S) -> StoreResult<usize> {
        let started_at = Instant::now();
        let result = store.list_all();
        self.loaded = true;
        match result {
            Ok(tasks) => {
                let count = tasks.len();
                self.tasks = tasks;
                self.load_error = None;
                info!(
                    "event=board_reload module=board status=ok count={} duration_ms={}",
                    count,
                    started_at.elapsed().as_millis()
                );
                Ok(count)
            }
            Err(err) => {
                error!(
                    "event=board_reload module=board status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                self.load_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Sets the status selector; `None` selects all statuses.
    pub fn set_status_filter(&mut self, status: Option<TaskStatus>) {
        self.criteria.status = status;
    }

    /// Sets the priority selector; `None` selects all priorities.
    pub fn set_priority_filter(&mut self, priority: Option<TaskPriority>) {
        self.criteria.priority = priority;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.criteria.search_text = text.into();
    }

    /// Merges a saved task: replace by id when present, append otherwise.
    ///
    /// An update whose target is no longer in the collection (e.g. after a
    /// reload) is appended rather than dropped.
    pub fn apply_saved(&mut self, saved: SavedTask) {
        let SavedTask { kind, task } = saved;
        match self.tasks.iter_mut().find(|existing| existing.id == task.id) {
            Some(existing) => *existing = task,
            None => {
                if kind == SaveKind::Updated {
                    warn!(
                        "event=board_merge module=board status=ok task_id={} note=update_target_missing_appended",
                        task.id
                    );
                }
                self.tasks.push(task);
            }
        }
    }

    /// Submits `editor` against `store` and merges the saved task on success.
    pub fn submit_editor<S: TaskStore + ?Sized>(
        &mut self,
        editor: &mut TaskEditor,
        store: &S,
    ) -> SubmitOutcome {
        let outcome = editor.submit(store);
        if let SubmitOutcome::Saved(saved) = &outcome {
            self.apply_saved(saved.clone());
        }
        outcome
    }

    /// Board projection for the current collection and filter selection.
    pub fn view(&self) -> BoardView<'_> {
        project_board(&self.tasks, &self.criteria)
    }
}
