//! Task create/edit form lifecycle.
//!
//! # Responsibility
//! - Hold the form fields of the create/edit dialog.
//! - Drive `Idle -> Editing -> Submitting -> Idle | Editing(error)`.
//! - Turn the form into a store payload and the store reply into a `SavedTask`.
//!
//! # Invariants
//! - A blank title never reaches the store.
//! - At most one submission is in flight per editor; extra submits are no-ops.
//! - A failed submission keeps every form field as the user left it.
//! - Results for a closed or re-opened editor are discarded, never applied.
//!
//! The store call is split out of the state machine: `begin_submit` hands a
//! `SubmitRequest` to the caller and `finish_submit` applies its outcome.
//! `submit` runs both phases against a `TaskStore` in one call.

use crate::model::task::{Task, TaskId, TaskInput, TaskPriority, TaskStatus};
use crate::repo::task_store::{StoreResult, TaskStore};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Shown when a store failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong.";

const TAG_SEPARATOR: char = ',';
const TAG_JOINER: &str = ", ";

/// Lifecycle phase of the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorPhase {
    /// Dialog closed.
    #[default]
    Idle,
    /// Form open and accepting input.
    Editing,
    /// Store request in flight.
    Submitting,
}

/// Whether the open form creates a task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(TaskId),
}

impl EditorMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit(_) => "edit",
        }
    }
}

/// What to open the editor on.
#[derive(Debug, Clone, Copy)]
pub enum OpenTarget<'a> {
    Create,
    Edit(&'a Task),
}

/// Editor misuse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// The editor cannot be re-opened while a submission is in flight.
    SubmitInFlight,
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubmitInFlight => write!(f, "a submission is already in flight"),
        }
    }
}

impl Error for EditorError {}

/// Editable form fields. Tags are kept as the comma-separated text the user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub tags: String,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl TaskForm {
    /// Fields for a new task: empty text, `BACKLOG`, `MEDIUM`, no tags.
    pub fn blank() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            tags: String::new(),
        }
    }

    /// Fields pre-populated from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            tags: join_tags(&task.tags),
        }
    }

    /// Store payload: trimmed title/description and split tags.
    pub fn to_input(&self) -> TaskInput {
        TaskInput {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            priority: self.priority,
            tags: split_tags(&self.tags),
        }
    }
}

/// Joins tags into the editable comma-separated form.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_JOINER)
}

/// Splits comma-separated text into trimmed, non-empty tags, keeping order
/// and duplicates.
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Identifies the editor session a submission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket {
    session: u64,
}

/// A validated submission waiting to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub ticket: SubmitTicket,
    pub mode: EditorMode,
    pub input: TaskInput,
}

impl SubmitRequest {
    /// Sends the payload with the store call matching the editor mode.
    pub fn send<S: TaskStore + ?Sized>(&self, store: &S) -> StoreResult<Task> {
        match self.mode {
            EditorMode::Create => store.create(&self.input),
            EditorMode::Edit(id) => store.update_by_id(id, &self.input),
        }
    }
}

/// How a saved task relates to the collection it is merged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Created,
    Updated,
}

/// Canonical task returned by a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTask {
    pub kind: SaveKind,
    pub task: Task,
}

/// Result of one `submit`/`finish_submit` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Store accepted the task; the editor is idle again.
    Saved(SavedTask),
    /// Client-side validation failed; no store call was made.
    Invalid,
    /// Store call failed; the message is also kept on the editor.
    Failed(String),
    /// Editor was not in `Editing`; nothing happened.
    Ignored,
    /// Result arrived for a closed or re-opened editor and was dropped.
    Discarded,
}

/// Create/edit dialog state machine.
#[derive(Debug, Default)]
pub struct TaskEditor {
    phase: EditorPhase,
    mode: Option<EditorMode>,
    form: TaskForm,
    error: Option<String>,
    session: u64,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Mode of the open form, `None` while idle.
    pub fn mode(&self) -> Option<EditorMode> {
        self.mode
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    /// Error message to display, if the last submit failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.phase != EditorPhase::Idle
    }

    /// Dialog title for the current mode.
    pub fn title(&self) -> &'static str {
        match self.mode {
            Some(EditorMode::Edit(_)) => "Edit Task",
            _ => "New Task",
        }
    }

    /// Opens the form for creating a task or editing `task`.
    ///
    /// Re-opening while `Editing` replaces the form and starts a new session.
    ///
    /// # Errors
    /// - `SubmitInFlight` while a submission is pending.
    pub fn open(&mut self, target: OpenTarget<'_>) -> Result<(), EditorError> {
        if self.phase == EditorPhase::Submitting {
            return Err(EditorError::SubmitInFlight);
        }

        let (mode, form) = match target {
            OpenTarget::Create => (EditorMode::Create, TaskForm::blank()),
            OpenTarget::Edit(task) => (EditorMode::Edit(task.id), TaskForm::from_task(task)),
        };
        self.session += 1;
        self.phase = EditorPhase::Editing;
        self.mode = Some(mode);
        self.form = form;
        self.error = None;
        Ok(())
    }

    /// Mutable form access; `None` unless the editor is `Editing`.
    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        match self.phase {
            EditorPhase::Editing => Some(&mut self.form),
            _ => None,
        }
    }

    /// Validates the form and moves to `Submitting`.
    ///
    /// Returns `None` without side effects unless `Editing`. Returns `None`
    /// and records "Title is required." when the title is blank.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.phase != EditorPhase::Editing {
            return None;
        }
        let mode = self.mode?;

        self.error = None;
        let input = self.form.to_input();
        if let Err(err) = input.validate() {
            self.error = Some(err.to_string());
            return None;
        }

        self.phase = EditorPhase::Submitting;
        info!(
            "event=editor_submit module=editor status=start mode={}",
            mode.as_str()
        );
        Some(SubmitRequest {
            ticket: SubmitTicket {
                session: self.session,
            },
            mode,
            input,
        })
    }

    /// Applies the store reply for a request from `begin_submit`.
    pub fn finish_submit(
        &mut self,
        ticket: SubmitTicket,
        result: StoreResult<Task>,
    ) -> SubmitOutcome {
        if self.phase != EditorPhase::Submitting || ticket.session != self.session {
            warn!(
                "event=editor_result_discarded module=editor status=ok ticket_session={} current_session={} succeeded={}",
                ticket.session,
                self.session,
                result.is_ok()
            );
            return SubmitOutcome::Discarded;
        }

        let Some(mode) = self.mode else {
            return SubmitOutcome::Discarded;
        };

        match result {
            Ok(task) => {
                info!(
                    "event=editor_submit module=editor status=ok mode={} task_id={}",
                    mode.as_str(),
                    task.id
                );
                let kind = match mode {
                    EditorMode::Create => SaveKind::Created,
                    EditorMode::Edit(_) => SaveKind::Updated,
                };
                self.reset();
                SubmitOutcome::Saved(SavedTask { kind, task })
            }
            Err(err) => {
                let message = match err.to_string() {
                    text if text.trim().is_empty() => FALLBACK_ERROR_MESSAGE.to_string(),
                    text => text,
                };
                info!(
                    "event=editor_submit module=editor status=error mode={} error={}",
                    mode.as_str(),
                    message
                );
                self.phase = EditorPhase::Editing;
                self.error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Validates, calls the store and applies the outcome in one step.
    pub fn submit<S: TaskStore + ?Sized>(&mut self, store: &S) -> SubmitOutcome {
        if self.phase != EditorPhase::Editing {
            return SubmitOutcome::Ignored;
        }
        let Some(request) = self.begin_submit() else {
            return SubmitOutcome::Invalid;
        };
        let result = request.send(store);
        self.finish_submit(request.ticket, result)
    }

    /// Closes the dialog from any phase, discarding unsaved input.
    ///
    /// A submission still in flight keeps running but its result will be
    /// discarded by `finish_submit`.
    pub fn close(&mut self) {
        self.session += 1;
        self.reset();
    }

    fn reset(&mut self) {
        self.phase = EditorPhase::Idle;
        self.mode = None;
        self.form = TaskForm::blank();
        self.error = None;
    }
}
