//! `taskboard` command-line entry point.
//!
//! # Responsibility
//! - Map subcommands onto the core board state and task editor.
//! - Keep stdout for board output and stderr for errors.

mod config;
mod render;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use config::BoardConfig;
use log::{info, warn};
use std::path::PathBuf;
use std::process::ExitCode;
use taskboard_core::db::open_db;
use taskboard_core::view::filter::{parse_priority_selector, parse_status_selector};
use taskboard_core::{
    core_version, filter_tasks, init_logging, BoardState, OpenTarget, SqliteTaskStore,
    SubmitOutcome, TaskEditor, TaskForm, TaskPriority, TaskStatus,
};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "taskboard", author, version, about = "Kanban-style task board", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "TASKBOARD_DB")]
    db: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "TASKBOARD_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rotating log files
    #[arg(long, global = true, env = "TASKBOARD_LOG_DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show the board, optionally filtered
    List {
        /// Status selector: ALL, BACKLOG, IN_PROGRESS or DONE
        #[arg(long, default_value = "ALL")]
        status: String,

        /// Priority selector: ALL, LOW, MEDIUM or HIGH
        #[arg(long, default_value = "ALL")]
        priority: String,

        /// Case-insensitive text matched against title and description
        #[arg(long, default_value = "")]
        search: String,

        /// Print the filtered tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a task
    Add {
        #[arg(long)]
        title: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update an existing task
    Edit {
        /// Task id
        id: Uuid,

        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Print version information
    Version,
}

#[derive(Args, Debug, Default)]
struct FieldArgs {
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    status: Option<TaskStatus>,

    #[arg(long)]
    priority: Option<TaskPriority>,

    /// Comma-separated tags
    #[arg(long)]
    tags: Option<String>,
}

impl FieldArgs {
    fn apply(self, form: &mut TaskForm) {
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(priority) = self.priority {
            form.priority = priority;
        }
        if let Some(tags) = self.tags {
            form.tags = tags;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = BoardConfig::resolve(cli.db, cli.log_level, cli.log_dir);
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, &log_dir.to_string_lossy())
            .map_err(|err| anyhow!(err))?;
    }

    match cli.command {
        Commands::Version => {
            println!("taskboard {}", env!("CARGO_PKG_VERSION"));
            println!("taskboard_core {}", core_version());
            Ok(())
        }
        Commands::List {
            status,
            priority,
            search,
            json,
        } => list(&config, &status, &priority, search, json),
        Commands::Add { title, fields } => add(&config, title, fields),
        Commands::Edit { id, title, fields } => edit(&config, id, title, fields),
    }
}

fn list(
    config: &BoardConfig,
    status: &str,
    priority: &str,
    search: String,
    json: bool,
) -> Result<()> {
    let status = parse_status_selector(status)?;
    let priority = parse_priority_selector(priority)?;

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = SqliteTaskStore::try_new(&conn)?;

    let mut board = BoardState::new();
    board.reload(&store)?;
    board.set_status_filter(status);
    board.set_priority_filter(priority);
    board.set_search_text(search);

    if json {
        let visible = filter_tasks(board.tasks(), board.criteria());
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        print!("{}", render::render_board(&board.view()));
    }
    Ok(())
}

fn add(config: &BoardConfig, title: String, fields: FieldArgs) -> Result<()> {
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = SqliteTaskStore::try_new(&conn)?;

    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Create)?;
    let form = editor
        .form_mut()
        .ok_or_else(|| anyhow!("editor is not accepting input"))?;
    form.title = title;
    fields.apply(form);

    submit(&mut editor, &store, "created")
}

fn edit(config: &BoardConfig, id: Uuid, title: Option<String>, fields: FieldArgs) -> Result<()> {
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = SqliteTaskStore::try_new(&conn)?;
    let Some(task) = store.get_task(id)? else {
        bail!("task not found: {id}");
    };

    let mut editor = TaskEditor::new();
    editor.open(OpenTarget::Edit(&task))?;
    let form = editor
        .form_mut()
        .ok_or_else(|| anyhow!("editor is not accepting input"))?;
    if let Some(title) = title {
        form.title = title;
    }
    fields.apply(form);

    submit(&mut editor, &store, "updated")
}

fn submit(editor: &mut TaskEditor, store: &SqliteTaskStore<'_>, verb: &str) -> Result<()> {
    let mut board = BoardState::new();
    match board.submit_editor(editor, store) {
        SubmitOutcome::Saved(saved) => {
            info!(
                "event=cli_submit module=cli status=ok verb={} task_id={}",
                verb, saved.task.id
            );
            println!("{}", render::render_saved(verb, &saved.task));
            Ok(())
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed(_) => {
            let message = editor.error().unwrap_or("task was not saved").to_string();
            warn!("event=cli_submit module=cli status=error verb={}", verb);
            bail!(message)
        }
        SubmitOutcome::Ignored | SubmitOutcome::Discarded => {
            bail!("{} was not submitted", editor.title())
        }
    }
}
