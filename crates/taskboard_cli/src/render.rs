//! Plain-text board rendering.

use std::fmt::Write;
use taskboard_core::view::projection::EMPTY_COLUMN_MESSAGE;
use taskboard_core::{BoardView, Task};

const BOARD_TITLE: &str = "DevTasks Board";

/// Renders the board columns as indented text.
pub fn render_board(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{BOARD_TITLE} ({} of {} tasks)",
        view.visible, view.total
    );

    for column in &view.columns {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", column.header());
        if column.cards.is_empty() {
            let _ = writeln!(out, "  {EMPTY_COLUMN_MESSAGE}");
            continue;
        }
        for card in &column.cards {
            let task = card.task;
            let _ = writeln!(out, "  - {} [{}] {}", task.title, card.priority_label, task.id);
            if !task.description.is_empty() {
                let _ = writeln!(out, "    {}", first_line(&task.description));
            }
            if !task.tags.is_empty() {
                let _ = writeln!(out, "    {}", hashtags(&task.tags));
            }
        }
    }
    out
}

/// One-line summary of a saved task.
pub fn render_saved(verb: &str, task: &Task) -> String {
    format!(
        "{verb} {} \"{}\" [{} / {}]",
        task.id,
        task.title,
        task.status.label(),
        task.priority.label()
    )
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

fn hashtags(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ")
}
