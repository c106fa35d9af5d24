use std::path::PathBuf;

use crate::app::App;
use crate::cli::commands::*;
use crate::cli::menu;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::recovery;
use crate::io::store_io::TaskFile;
use crate::model::session::SessionState;
use crate::model::task::{TaskField, TaskStatus};
use crate::ops::date;
use crate::ops::task_ops::TaskDraft;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let file = task_file(cli.data.as_deref());

    match cli.command {
        None => menu::run(file),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(file, args, json),
            Commands::Stats => cmd_stats(file, json),
            Commands::Recovery(args) => cmd_recovery(file, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(file, args, json),
            Commands::Delete(args) => cmd_delete(file, args, json),
            Commands::Done(args) => cmd_done(file, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve the task file: `--data` wins over the config file.
fn task_file(data_override: Option<&str>) -> TaskFile {
    let config = config_io::read_config();
    let path = data_override
        .map(PathBuf::from)
        .unwrap_or(config.data_path);
    if config.recovery_log {
        TaskFile::new(path)
    } else {
        TaskFile::without_recovery_log(path)
    }
}

/// Load the task file and bring overdue statuses up to date.
fn open_app(file: TaskFile) -> App {
    let mut app = App::open(file);
    if let Err(e) = app.refresh(&date::now()) {
        eprintln!("warning: overdue tasks were marked but not saved: {}", e);
    }
    app
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(file: TaskFile, args: ListArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(file);

    let mut session = SessionState::default();
    if let Some(keyword) = &args.search {
        session.set_keyword(keyword)?;
    }
    if let Some(field) = &args.sort {
        session.set_sort_field(field.parse::<TaskField>()?, !args.desc);
    }

    let mut tasks = session.view(&app.store.tasks);
    if let Some(priority) = args.priority {
        tasks.retain(|t| t.priority == priority);
    }

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| task_to_json(t)).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", format_summary(&app.summary()));
        for line in format_task_table(&tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_stats(file: TaskFile, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(file);
    let summary = app.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary_to_json(&summary))?);
    } else {
        println!("{}", format_summary(&summary));
    }
    Ok(())
}

fn cmd_recovery(
    file: TaskFile,
    args: RecoveryArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = file
        .log_dir()
        .ok_or("the recovery log is disabled in the config file")?;
    let entries = recovery::read_recovery_entries(dir, args.limit);

    if json {
        let out: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if entries.is_empty() {
        println!("No recovery entries.");
    } else {
        for entry in &entries {
            print!("{}", entry.to_display_markdown());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(file: TaskFile, args: AddArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(file);
    let draft = TaskDraft {
        task: args.task,
        category: args.category,
        priority: args.priority,
        description: args.description,
        due_date: args.due,
    };
    let id = app.add(draft, date::now())?;
    if json {
        println!("{}", serde_json::json!({ "id": id }));
    } else {
        println!("{}", id);
    }
    Ok(())
}

fn cmd_delete(file: TaskFile, args: IdArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(file);
    let removed = app.delete(args.id)?;
    if json {
        println!("{}", serde_json::json!({ "id": removed.id, "task": removed.task }));
    } else {
        println!("deleted {} ({})", removed.id, removed.task);
    }
    Ok(())
}

fn cmd_done(file: TaskFile, args: IdArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = open_app(file);
    app.complete(args.id)?;
    if json {
        println!(
            "{}",
            serde_json::json!({ "id": args.id, "status": TaskStatus::Done.name() })
        );
    } else {
        println!("{} → done", args.id);
    }
    Ok(())
}
