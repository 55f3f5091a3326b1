//! Multi-predicate task filter.
//!
//! # Invariants
//! - Filtering is pure and stable: output keeps input relative order.
//! - Search matching is Unicode case-insensitive over `title + " " + description`.
//! - An empty search text matches every task.

use crate::model::task::{Task, TaskPriority, TaskStatus, UnknownVariantError};

/// Selector value meaning "no constraint" for status/priority filters.
pub const ALL_SELECTOR: &str = "ALL";

/// Current filter selection applied to the task collection.
///
/// `None` for `status`/`priority` stands for the `ALL` selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub search_text: String,
}

impl FilterCriteria {
    /// Returns whether one task passes every predicate.
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_with_needle(task, &fold_case(&self.search_text))
    }

    fn matches_with_needle(&self, task: &Task, needle: &str) -> bool {
        if self.status.is_some_and(|status| status != task.status) {
            return false;
        }

        if self.priority.is_some_and(|priority| priority != task.priority) {
            return false;
        }

        if needle.is_empty() {
            return true;
        }

        let haystack = fold_case(&format!("{} {}", task.title, task.description));
        haystack.contains(needle)
    }
}

/// Returns tasks passing `criteria`, in input order.
///
/// Accepts any iterator of task references so a filtered result can be fed
/// back in without cloning.
pub fn filter_tasks<'a, I>(tasks: I, criteria: &FilterCriteria) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let needle = fold_case(&criteria.search_text);
    tasks
        .into_iter()
        .filter(|task| criteria.matches_with_needle(task, &needle))
        .collect()
}

/// Parses a status selector: `ALL` (any case) or a status wire name.
pub fn parse_status_selector(value: &str) -> Result<Option<TaskStatus>, UnknownVariantError> {
    if value.trim().eq_ignore_ascii_case(ALL_SELECTOR) {
        return Ok(None);
    }
    value.parse().map(Some)
}

/// Parses a priority selector: `ALL` (any case) or a priority wire name.
pub fn parse_priority_selector(value: &str) -> Result<Option<TaskPriority>, UnknownVariantError> {
    if value.trim().eq_ignore_ascii_case(ALL_SELECTOR) {
        return Ok(None);
    }
    value.parse().map(Some)
}

fn fold_case(value: &str) -> String {
    value.to_lowercase()
}
