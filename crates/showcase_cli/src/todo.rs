//! `showcase todo` subcommands.

use crate::cli::TodoCommand;
use showcase_core::{
    DragReorderController, DropOutcome, EditSession, Task, TaskFilter, TaskRepository, TaskStore,
};
use std::error::Error;

pub fn execute<R: TaskRepository>(repo: R, command: TodoCommand) -> Result<(), Box<dyn Error>> {
    let mut store = TaskStore::hydrate(repo);

    match command {
        TodoCommand::Add { text, due } => match store.add(text, due) {
            Some(id) => println!("added {id}"),
            None => println!("nothing added: task text is empty"),
        },
        TodoCommand::List { filter } => print_tasks(&store, filter),
        TodoCommand::Edit { id, text } => {
            let mut session = EditSession::new();
            if session.begin(&store, id) {
                session.set_buffer(text);
                session.save(&mut store);
                println!("edited {id}");
            } else {
                println!("no task {id}");
            }
        }
        TodoCommand::Toggle { id } => {
            if store.toggle_completion(id) {
                let state = match store.get(id) {
                    Some(task) if task.completed => "completed",
                    _ => "pending",
                };
                println!("{id} is now {state}");
            } else {
                println!("no task {id}");
            }
        }
        TodoCommand::Delete { id } => {
            if store.delete(id) {
                println!("deleted {id}");
            } else {
                println!("no task {id}");
            }
        }
        TodoCommand::Move { from, to, filter } => {
            let mut drag = DragReorderController::new();
            if !drag.pick_up(&store, filter, from) {
                println!("no row {from} in {filter} view");
            } else {
                match drag.drop(&mut store, Some(to)) {
                    DropOutcome::Moved { .. } => print_tasks(&store, filter),
                    DropOutcome::Cancelled | DropOutcome::NotDragging => {
                        println!("list unchanged")
                    }
                }
            }
        }
        TodoCommand::Counts => {
            let counts = store.counts();
            println!(
                "all={} completed={} pending={}",
                counts.total, counts.completed, counts.pending
            );
        }
    }

    match store.last_persist_error() {
        Some(err) => Err(format!("changes were not saved: {err}").into()),
        None => Ok(()),
    }
}

fn print_tasks<R: TaskRepository>(store: &TaskStore<R>, filter: TaskFilter) {
    let view = store.filtered_view(filter);
    if view.is_empty() {
        println!("No tasks available.");
        return;
    }
    for (row, task) in view.iter().enumerate() {
        println!("{row:>3}. {}", render_task(task));
    }
}

fn render_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    match task.due_date {
        Some(due) => format!("[{mark}] {} (Due: {due}) #{}", task.text, task.id),
        None => format!("[{mark}] {} #{}", task.text, task.id),
    }
}
