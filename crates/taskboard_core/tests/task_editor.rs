mod common;

use common::{fix_bug_and_write_docs, RecordingStore};
use taskboard_core::{
    BoardState, EditorError, EditorMode, EditorPhase, OpenTarget, SaveKind, StoreError,
    SubmitOutcome, TaskEditor, TaskPriority, TaskStatus, TaskStore,
};

#[test]
fn open_create_uses_defaults() {
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();

    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert_eq!(editor.mode(), Some(EditorMode::Create));
    let form = editor.form();
    assert!(form.title.is_empty());
    assert!(form.description.is_empty());
    assert_eq!(form.status, TaskStatus::Backlog);
    assert_eq!(form.priority, TaskPriority::Medium);
    assert!(form.tags.is_empty());
}

#[test]
fn open_edit_prepopulates_and_joins_tags() {
    let mut tasks = fix_bug_and_write_docs();
    tasks[0].description = "panic on empty input".to_string();
    tasks[0].tags = vec!["core".to_string(), "urgent".to_string()];

    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Edit(&tasks[0])).unwrap();

    assert_eq!(editor.mode(), Some(EditorMode::Edit(tasks[0].id)));
    assert_eq!(editor.title(), "Edit Task");
    let form = editor.form();
    assert_eq!(form.title, "Fix bug");
    assert_eq!(form.description, "panic on empty input");
    assert_eq!(form.status, TaskStatus::Backlog);
    assert_eq!(form.priority, TaskPriority::High);
    assert_eq!(form.tags, "core, urgent");
}

#[test]
fn blank_titles_never_reach_the_store() {
    for title in ["", "   ", " \t "] {
        let store = RecordingStore::new();
        let mut editor = TaskEditor::new();
        editor.open(OpenTarget::Create).unwrap();
        editor.form_mut().unwrap().title = title.to_string();

        let outcome = editor.submit(&store);

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(store.calls(), 0);
        assert_eq!(editor.phase(), EditorPhase::Editing);
        assert_eq!(editor.error(), Some("Title is required."));
    }
}

#[test]
fn successful_create_returns_canonical_task_and_goes_idle() {
    let store = RecordingStore::new();
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    {
        let form = editor.form_mut().unwrap();
        form.title = "  Ship release  ".to_string();
        form.description = " notes ".to_string();
        form.priority = TaskPriority::High;
        form.tags = "release, , ops,release".to_string();
    }

    let outcome = editor.submit(&store);
    let SubmitOutcome::Saved(saved) = outcome else {
        panic!("expected saved outcome, got {outcome:?}");
    };

    assert_eq!(saved.kind, SaveKind::Created);
    assert_eq!(saved.task.title, "Ship release");
    assert_eq!(saved.task.description, "notes");
    assert_eq!(saved.task.priority, TaskPriority::High);
    assert_eq!(saved.task.status, TaskStatus::Backlog);
    assert_eq!(
        saved.task.tags,
        vec!["release".to_string(), "ops".to_string(), "release".to_string()]
    );
    assert!(saved.task.created_at.is_some());
    assert_eq!(store.calls(), 1);
    assert_eq!(editor.phase(), EditorPhase::Idle);
    assert!(editor.error().is_none());
    assert!(!editor.is_open());
}

#[test]
fn failed_submit_keeps_fields_and_shows_error() {
    let store = RecordingStore::new();
    store.fail_next("Request failed");
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "Retry me".to_string();
    editor.form_mut().unwrap().tags = "a, b".to_string();

    let outcome = editor.submit(&store);

    assert_eq!(outcome, SubmitOutcome::Failed("Request failed".to_string()));
    assert_eq!(editor.phase(), EditorPhase::Editing);
    assert_eq!(editor.error(), Some("Request failed"));
    assert_eq!(editor.form().title, "Retry me");
    assert_eq!(editor.form().tags, "a, b");

    let retry = editor.submit(&store);
    assert!(matches!(retry, SubmitOutcome::Saved(_)));
    assert_eq!(store.calls(), 2);
}

#[test]
fn empty_transport_message_falls_back_to_generic_text() {
    let store = RecordingStore::new();
    store.fail_next("");
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "x".to_string();

    editor.submit(&store);
    assert_eq!(editor.error(), Some("Something went wrong."));
}

#[test]
fn editing_a_vanished_task_reports_not_found_without_creating() {
    let tasks = fix_bug_and_write_docs();
    let store = RecordingStore::new();
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Edit(&tasks[0])).unwrap();

    let outcome = editor.submit(&store);

    let SubmitOutcome::Failed(message) = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.contains("task not found"));
    assert!(store.snapshot().is_empty());
    assert_eq!(editor.phase(), EditorPhase::Editing);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    let store = RecordingStore::new();
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "Once".to_string();

    let request = editor.begin_submit().expect("first submit starts");
    assert_eq!(editor.phase(), EditorPhase::Submitting);
    assert!(editor.begin_submit().is_none());
    assert_eq!(editor.submit(&store), SubmitOutcome::Ignored);
    assert!(editor.form_mut().is_none());
    assert_eq!(
        editor.open(OpenTarget::Create),
        Err(EditorError::SubmitInFlight)
    );
    assert_eq!(store.calls(), 0);

    let result = request.send(&store);
    let outcome = editor.finish_submit(request.ticket, result);
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(store.calls(), 1);
}

#[test]
fn close_discards_edits_and_in_flight_results() {
    let store = RecordingStore::new();
    let mut board = BoardState::with_tasks(Vec::new());
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "Late".to_string();

    let request = editor.begin_submit().unwrap();
    editor.close();
    assert_eq!(editor.phase(), EditorPhase::Idle);

    let result = request.send(&store);
    let outcome = editor.finish_submit(request.ticket, result);
    assert_eq!(outcome, SubmitOutcome::Discarded);
    if let SubmitOutcome::Saved(saved) = outcome {
        board.apply_saved(saved);
    }
    assert!(board.tasks().is_empty());
    assert_eq!(editor.phase(), EditorPhase::Idle);
}

#[test]
fn result_for_a_previous_session_is_discarded_after_reopen() {
    let store = RecordingStore::new();
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "First".to_string();
    let stale = editor.begin_submit().unwrap();
    editor.close();

    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "Second".to_string();
    let current = editor.begin_submit().unwrap();

    let stale_outcome = editor.finish_submit(stale.ticket, Err(StoreError::Transport("x".into())));
    assert_eq!(stale_outcome, SubmitOutcome::Discarded);
    assert_eq!(editor.phase(), EditorPhase::Submitting);

    let outcome = editor.finish_submit(current.ticket, current.send(&store));
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
}

#[test]
fn close_while_editing_makes_no_store_call() {
    let store = RecordingStore::new();
    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "Draft".to_string();
    editor.close();

    assert_eq!(store.calls(), 0);
    assert!(editor.form().title.is_empty());
    assert_eq!(editor.submit(&store), SubmitOutcome::Ignored);
}

#[test]
fn merge_after_create_inserts_id_exactly_once() {
    let store = RecordingStore::with_tasks(fix_bug_and_write_docs());
    let mut board = BoardState::new();
    board.reload(&store).unwrap();
    let before = board.tasks().len();

    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create).unwrap();
    editor.form_mut().unwrap().title = "New one".to_string();
    let outcome = board.submit_editor(&mut editor, &store);

    let SubmitOutcome::Saved(saved) = outcome else {
        panic!("expected saved outcome");
    };
    assert_eq!(board.tasks().len(), before + 1);
    let occurrences = board
        .tasks()
        .iter()
        .filter(|task| task.id == saved.task.id)
        .count();
    assert_eq!(occurrences, 1);

    // Applying the same saved task again is an upsert, not a duplicate.
    board.apply_saved(saved.clone());
    assert_eq!(board.tasks().len(), before + 1);
}

#[test]
fn merge_after_edit_replaces_in_place() {
    let store = RecordingStore::with_tasks(fix_bug_and_write_docs());
    let mut board = BoardState::new();
    board.reload(&store).unwrap();
    let before = board.tasks().len();
    let target = board
        .tasks()
        .iter()
        .find(|task| task.title == "Fix bug")
        .cloned()
        .unwrap();

    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Edit(&target)).unwrap();
    {
        let form = editor.form_mut().unwrap();
        form.title = "Fix crash".to_string();
        form.status = TaskStatus::InProgress;
        form.priority = TaskPriority::Medium;
        form.tags = "bug, crash".to_string();
    }
    let outcome = board.submit_editor(&mut editor, &store);
    assert!(matches!(
        outcome,
        SubmitOutcome::Saved(ref saved) if saved.kind == SaveKind::Updated
    ));

    assert_eq!(board.tasks().len(), before);
    let edited = board
        .tasks()
        .iter()
        .find(|task| task.id == target.id)
        .unwrap();
    assert_eq!(edited.title, "Fix crash");
    assert_eq!(edited.status, TaskStatus::InProgress);
    assert_eq!(edited.priority, TaskPriority::Medium);
    assert_eq!(edited.tags, vec!["bug".to_string(), "crash".to_string()]);
    assert_eq!(edited.id, target.id);
}

#[test]
fn failed_reload_keeps_previous_collection() {
    let store = RecordingStore::with_tasks(fix_bug_and_write_docs());
    let mut board = BoardState::new();
    assert!(board.is_loading());
    assert_eq!(board.reload(&store).unwrap(), 2);
    assert!(!board.is_loading());

    store.fail_next("connection reset");
    assert!(board.reload(&store).is_err());
    assert_eq!(board.tasks().len(), 2);
    assert_eq!(board.load_error(), Some("connection reset"));

    board.reload(&store).unwrap();
    assert!(board.load_error().is_none());
}

#[test]
fn board_view_follows_filter_setters() {
    let store = RecordingStore::with_tasks(fix_bug_and_write_docs());
    let mut board = BoardState::new();
    board.reload(&store).unwrap();

    board.set_status_filter(Some(TaskStatus::Done));
    assert_eq!(board.view().visible, 1);

    board.set_status_filter(None);
    board.set_priority_filter(Some(TaskPriority::High));
    assert_eq!(board.view().column(TaskStatus::Backlog).count, 1);

    board.set_priority_filter(None);
    board.set_search_text("DOCS");
    let view = board.view();
    assert_eq!(view.visible, 1);
    assert_eq!(view.column(TaskStatus::Done).cards[0].task.title, "Write docs");
    assert_eq!(store.list_all().unwrap().len(), 2);
}
