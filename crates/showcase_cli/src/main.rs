//! Host shell for the showcase demos.
//!
//! # Responsibility
//! - Resolve configuration from flags and initialize core logging.
//! - Route each subcommand to exactly one feature module.
//! - Render results as plain text; all invariants live in `showcase_core`.

mod cli;
mod todo;

use clap::Parser;
use cli::{Cli, Commands, GlobalArgs};
use showcase_core::db::open_db;
use showcase_core::gallery::{categories, ProjectLink};
use showcase_core::{
    init_logging, CalcKey, Calculator, CoreConfig, LocalStorageTaskRepository,
    MemoryLocalStorage, Route, SqliteLocalStorage,
};
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli.global);
    config.validate()?;

    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        // Logs are diagnostics only; the demos keep working without them.
        eprintln!("warning: logging disabled: {err}");
    }

    match cli.command {
        Commands::Route { path } => {
            match Route::resolve(&path) {
                Some(route) => println!("{} -> {}", route.path(), route.title()),
                None => println!("{path} -> no matching page"),
            }
            Ok(())
        }
        Commands::Gallery => {
            print_gallery();
            Ok(())
        }
        Commands::Calc { input, eval } => {
            run_calculator(&input, eval);
            Ok(())
        }
        Commands::Todo(command) => {
            if cli.global.ephemeral {
                let storage = MemoryLocalStorage::new();
                let repo = LocalStorageTaskRepository::with_key(&storage, &config.storage_key);
                todo::execute(repo, command)
            } else {
                let conn = open_db(&config.db_path)?;
                let repo = LocalStorageTaskRepository::with_key(
                    SqliteLocalStorage::new(&conn),
                    &config.storage_key,
                );
                todo::execute(repo, command)
            }
        }
    }
}

fn resolve_config(args: &GlobalArgs) -> CoreConfig {
    let mut config = match &args.data_dir {
        Some(dir) => CoreConfig::from_data_dir(dir),
        None => CoreConfig::default(),
    };
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &args.log_dir {
        config.log_dir = log_dir.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config
}

fn print_gallery() {
    for category in categories() {
        println!("{}", category.title);
        for project in category.projects {
            let target = match project.link {
                ProjectLink::Internal(path) => match project.link.route() {
                    Some(route) => format!("{path} ({})", route.title()),
                    None => format!("{path} (missing page)"),
                },
                ProjectLink::External(url) => url.to_string(),
            };
            println!("  - {:<22} {}", project.name, target);
        }
    }
}

fn run_calculator(input: &str, eval: bool) {
    let mut calculator = Calculator::new();
    for ch in input.chars().filter(|ch| !ch.is_whitespace()) {
        match CalcKey::from_key_name(&ch.to_string()) {
            Some(key) => calculator.press(key),
            None => eprintln!("ignored key `{ch}`"),
        }
    }
    if eval {
        calculator.press(CalcKey::Evaluate);
    }
    println!("{}", calculator.display());
}
