mod actions;
mod autosave;
mod config;
mod logging;
mod model;
mod report;
mod roster;
mod session;
mod shell;
mod storage;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::actions::{Action, execute};
use crate::config::AppConfig;
use crate::roster::SeedPolicy;
use crate::session::Session;

#[derive(Debug, Parser)]
#[command(name = "gradebook", version, about = "Student roster with background autosave")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Roster file.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Autosave interval in seconds.
    #[arg(long, global = true)]
    autosave_secs: Option<u64>,

    /// Start empty instead of seeding demo records when the roster file is empty.
    #[arg(long, global = true)]
    no_demo: bool,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
enum Command {
    /// Show the roster table.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Add a student.
    Add { name: String },
    /// Delete a student.
    Remove { name: String },
    /// Rename a student, keeping their scores.
    Rename { name: String, new_name: String },
    /// Append one score (0-100).
    Score {
        name: String,
        #[arg(allow_hyphen_values = true)]
        score: String,
    },
    /// Replace all scores with a comma-separated list.
    SetScores {
        name: String,
        #[arg(allow_hyphen_values = true)]
        scores: String,
    },
    /// Save now.
    Save,
    /// Interactive session on stdin.
    Shell,
}

impl Command {
    fn into_action(self) -> Option<Action> {
        match self {
            Command::List { json } => Some(Action::List { json }),
            Command::Add { name } => Some(Action::Add { name }),
            Command::Remove { name } => Some(Action::Remove { name }),
            Command::Rename { name, new_name } => Some(Action::Rename { name, new_name }),
            Command::Score { name, score } => Some(Action::Score { name, value: score }),
            Command::SetScores { name, scores } => Some(Action::SetScores { name, scores }),
            Command::Save => Some(Action::Save),
            Command::Shell => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.log_level);
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;
    let session = Session::open(&config).map_err(|e| e.to_string())?;

    let outcome = match cli.command.into_action() {
        Some(action) => execute(session.store(), &action)
            .map(|text| print!("{text}"))
            .map_err(|e| e.to_string()),
        None => {
            let stdin = std::io::stdin();
            shell::run_shell(session.store(), stdin.lock(), std::io::stdout())
                .map_err(|e| e.to_string())
        }
    };

    let report = session.close();
    outcome?;
    if !report.final_save {
        return Err("final save failed".to_string());
    }
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig, String> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path).map_err(|e| e.to_string())?,
        None => AppConfig::default(),
    };
    if let Some(file) = &cli.file {
        config.storage_path = file.clone();
    }
    if let Some(secs) = cli.autosave_secs {
        config.autosave_interval_secs = secs;
    }
    if cli.no_demo {
        config.seed = SeedPolicy::Empty;
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
