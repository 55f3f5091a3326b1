//! Status partition of a task sequence.
//!
//! # Invariants
//! - Every status key is always present, possibly empty.
//! - Each task lands in exactly one group (total, disjoint partition).
//! - Relative input order is preserved inside each group.

use crate::model::task::{Task, TaskStatus};

/// Tasks partitioned by status, one field per board column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusGroups<'a> {
    pub backlog: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> StatusGroups<'a> {
    /// Group for one status.
    pub fn get(&self, status: TaskStatus) -> &[&'a Task] {
        match status {
            TaskStatus::Backlog => &self.backlog,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn get_mut(&mut self, status: TaskStatus) -> &mut Vec<&'a Task> {
        match status {
            TaskStatus::Backlog => &mut self.backlog,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Groups in fixed column order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskStatus, &[&'a Task])> + '_ {
        TaskStatus::ALL
            .into_iter()
            .map(move |status| (status, self.get(status)))
    }

    /// Total number of grouped tasks.
    pub fn len(&self) -> usize {
        self.backlog.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions tasks by status in a single pass.
pub fn group_by_status<'a, I>(tasks: I) -> StatusGroups<'a>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut groups = StatusGroups::default();
    for task in tasks {
        groups.get_mut(task.status).push(task);
    }
    groups
}
