//! Command-line host for the todo list.
//!
//! # Responsibility
//! - Drive the core controller against the same `data.txt` a mobile host uses.
//! - Keep output line-oriented: one `position<TAB>text` row per item.

use clap::{Parser, Subcommand};
use simpletodo_core::{
    default_log_level, init_logging, LineFileStore, RecordingObserver, TodoController,
};
use std::path::PathBuf;
use std::process::ExitCode;

const DATA_DIR_ENV: &str = "SIMPLETODO_DATA_DIR";
const LOG_DIR_ENV: &str = "SIMPLETODO_LOG_DIR";
const DEFAULT_DATA_DIR_NAME: &str = "simpletodo";

#[derive(Parser, Debug)]
#[command(name = "simpletodo", version, about = "Edit the SimpleTodo list file")]
struct Cli {
    /// Directory holding `data.txt`. Blank values fall back to the temp dir.
    #[arg(long, env = DATA_DIR_ENV)]
    data_dir: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = LOG_DIR_ENV)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Print the core health check and version.
    Ping,
    /// Print every item (default).
    List,
    /// Append an item; words are joined with single spaces.
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Replace the text at a position.
    Edit {
        position: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Delete the item at a position.
    Rm { position: usize },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = non_blank(cli.log_dir.as_deref()) {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let command = cli.command.unwrap_or(Command::List);
    if command == Command::Ping {
        println!("simpletodo_core ping={}", simpletodo_core::ping());
        println!(
            "simpletodo_core version={}",
            simpletodo_core::core_version()
        );
        return ExitCode::SUCCESS;
    }

    let store = LineFileStore::in_dir(resolve_data_dir(cli.data_dir.as_deref()));
    let mut todo = TodoController::open(store, RecordingObserver::new());

    let report = match command {
        Command::Ping | Command::List => None,
        Command::Add { text } => Some(Ok(todo.append(text.join(" ")))),
        Command::Edit { position, text } => Some(todo.replace(position, text.join(" "))),
        Command::Rm { position } => Some(todo.remove_at(position)),
    };

    match report {
        Some(Ok(report)) if !report.persisted => {
            eprintln!("{} but could not be saved", report.notice());
            return ExitCode::FAILURE;
        }
        Some(Ok(report)) => eprintln!("{}", report.notice()),
        Some(Err(err)) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        None => {}
    }

    for row in todo.rows() {
        println!("{}\t{}", row.position, row.text);
    }
    ExitCode::SUCCESS
}

/// Flag or `SIMPLETODO_DATA_DIR` when non-blank, else `<tmp>/simpletodo`.
fn resolve_data_dir(configured: Option<&str>) -> PathBuf {
    match non_blank(configured) {
        Some(dir) => PathBuf::from(dir),
        None => std::env::temp_dir().join(DEFAULT_DATA_DIR_NAME),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
