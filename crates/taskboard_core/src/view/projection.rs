//! Read-only board projection for the presentation layer.
//!
//! Combines filtering, status grouping and the static label tables into one
//! value a renderer can walk without further lookups.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::view::filter::{filter_tasks, FilterCriteria};
use crate::view::group::{group_by_status, StatusGroups};

/// Placeholder shown for a column with no tasks.
pub const EMPTY_COLUMN_MESSAGE: &str = "No tasks in this column.";
/// Label of the `ALL` status selector.
pub const ALL_STATUSES_LABEL: &str = "All Statuses";
/// Label of the `ALL` priority selector.
pub const ALL_PRIORITIES_LABEL: &str = "All Priorities";

/// One task as rendered on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard<'a> {
    pub task: &'a Task,
    pub priority_label: &'static str,
}

/// One status column with its header data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardColumn<'a> {
    pub status: TaskStatus,
    pub label: &'static str,
    /// Number of cards after filtering; shown in the column header.
    pub count: usize,
    pub cards: Vec<TaskCard<'a>>,
}

impl BoardColumn<'_> {
    /// Header text, e.g. `In Progress (2)`.
    pub fn header(&self) -> String {
        format!("{} ({})", self.label, self.count)
    }
}

/// Full board: three columns in fixed status order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    pub columns: Vec<BoardColumn<'a>>,
    /// Number of tasks that passed the filter.
    pub visible: usize,
    /// Number of tasks before filtering.
    pub total: usize,
}

impl<'a> BoardView<'a> {
    /// Column for one status.
    pub fn column(&self, status: TaskStatus) -> &BoardColumn<'a> {
        let index = match status {
            TaskStatus::Backlog => 0,
            TaskStatus::InProgress => 1,
            TaskStatus::Done => 2,
        };
        &self.columns[index]
    }
}

/// Builds the board projection from a task collection and filter selection.
pub fn project_board<'a>(tasks: &'a [Task], criteria: &FilterCriteria) -> BoardView<'a> {
    let filtered = filter_tasks(tasks, criteria);
    let groups = group_by_status(filtered.iter().copied());
    build_columns(&groups, tasks.len())
}

fn build_columns<'a>(groups: &StatusGroups<'a>, total: usize) -> BoardView<'a> {
    let columns = groups
        .iter()
        .map(|(status, tasks)| BoardColumn {
            status,
            label: status_label(status),
            count: tasks.len(),
            cards: tasks
                .iter()
                .copied()
                .map(|task| TaskCard {
                    task,
                    priority_label: priority_label(task.priority),
                })
                .collect(),
        })
        .collect();

    BoardView {
        columns,
        visible: groups.len(),
        total,
    }
}

/// Status → column label lookup.
pub fn status_label(status: TaskStatus) -> &'static str {
    status.label()
}

/// Priority → badge label lookup.
pub fn priority_label(priority: TaskPriority) -> &'static str {
    priority.label()
}
