#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use std::cell::{Cell, RefCell};
use taskboard_core::{
    StoreError, StoreResult, Task, TaskId, TaskInput, TaskPriority, TaskStatus, TaskStore,
};
use uuid::Uuid;

/// In-memory store double that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingStore {
    tasks: RefCell<Vec<Task>>,
    calls: Cell<usize>,
    fail_with: RefCell<Option<String>>,
    ticks: Cell<i64>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let store = Self::default();
        *store.tasks.borrow_mut() = tasks;
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn fail_next(&self, message: &str) {
        *self.fail_with.borrow_mut() = Some(message.to_string());
    }

    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    fn record_call(&self) -> StoreResult<()> {
        self.calls.set(self.calls.get() + 1);
        match self.fail_with.borrow_mut().take() {
            Some(message) => Err(StoreError::Transport(message)),
            None => Ok(()),
        }
    }

    fn next_timestamp(&self) -> chrono::DateTime<Utc> {
        let tick = self.ticks.get() + 1;
        self.ticks.set(tick);
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() + Duration::seconds(tick)
    }
}

impl TaskStore for RecordingStore {
    fn list_all(&self) -> StoreResult<Vec<Task>> {
        self.record_call()?;
        let mut tasks = self.tasks.borrow().clone();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    fn create(&self, input: &TaskInput) -> StoreResult<Task> {
        self.record_call()?;
        input.validate()?;
        let now = self.next_timestamp();
        let task = Task {
            id: Uuid::new_v4(),
            title: input.title.clone(),
            description: input.description.clone(),
            status: input.status,
            priority: input.priority,
            tags: input.tags.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    fn update_by_id(&self, id: TaskId, input: &TaskInput) -> StoreResult<Task> {
        self.record_call()?;
        input.validate()?;
        let now = self.next_timestamp();
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(StoreError::NotFound(id))?;
        task.title = input.title.clone();
        task.description = input.description.clone();
        task.status = input.status;
        task.priority = input.priority;
        task.tags = input.tags.clone();
        task.updated_at = Some(now);
        Ok(task.clone())
    }
}

pub fn task(title: &str, status: TaskStatus, priority: TaskPriority) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: String::new(),
        status,
        priority,
        tags: Vec::new(),
        created_at: None,
        updated_at: None,
    }
}

/// The two-task board used throughout the scenarios.
pub fn fix_bug_and_write_docs() -> Vec<Task> {
    vec![
        task("Fix bug", TaskStatus::Backlog, TaskPriority::High),
        task("Write docs", TaskStatus::Done, TaskPriority::Low),
    ]
}
