//! Line-oriented interactive frontend.
//!
//! Runs on the foreground thread while the autosave pump works in the
//! background. Names may contain spaces, so two-part commands use a
//! separator: `rename <name> -> <new>`, `score <name>: <v>`,
//! `scores <name>: <v1, v2, ...>`.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::actions::{Action, execute};
use crate::roster::RosterStore;

pub const HELP: &str = "\
commands:
  list [json]                  show the roster
  add <name>                   add a student
  remove <name>                delete a student
  rename <name> -> <new name>  rename a student
  score <name>: <score>        append one score (0-100)
  scores <name>: <s1, s2, ...> replace all scores (empty clears)
  save                         save now
  help                         show this help
  quit                         save and exit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run(Action),
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Splits at the first `sep`, or at the last one when `from_right` is set.
/// Score input never contains `:`, so names with a colon stay intact.
fn split_pair<'a>(
    rest: &'a str,
    sep: &str,
    from_right: bool,
    usage: &'static str,
) -> Result<(&'a str, &'a str), ShellError> {
    let split = if from_right {
        rest.rsplit_once(sep)
    } else {
        rest.split_once(sep)
    };
    let (left, right) = split.ok_or(ShellError::Usage(usage))?;
    let left = left.trim();
    if left.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    Ok((left, right.trim()))
}

fn require(rest: &str, usage: &'static str) -> Result<String, ShellError> {
    if rest.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    Ok(rest.to_string())
}

pub fn parse_shell_line(line: &str) -> Result<ShellCommand, ShellError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Nothing);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let action = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(ShellCommand::Help),
        "quit" | "exit" => return Ok(ShellCommand::Quit),
        "list" | "ls" => match rest {
            "" => Action::List { json: false },
            "json" => Action::List { json: true },
            _ => return Err(ShellError::Usage("list [json]")),
        },
        "save" => Action::Save,
        "add" => Action::Add {
            name: require(rest, "add <name>")?,
        },
        "remove" | "rm" => Action::Remove {
            name: require(rest, "remove <name>")?,
        },
        "rename" => {
            let (name, new_name) = split_pair(rest, "->", false, "rename <name> -> <new name>")?;
            Action::Rename {
                name: name.to_string(),
                new_name: new_name.to_string(),
            }
        }
        "score" => {
            let (name, value) = split_pair(rest, ":", true, "score <name>: <score>")?;
            Action::Score {
                name: name.to_string(),
                value: value.to_string(),
            }
        }
        "scores" => {
            let (name, scores) = split_pair(rest, ":", true, "scores <name>: <s1, s2, ...>")?;
            Action::SetScores {
                name: name.to_string(),
                scores: scores.to_string(),
            }
        }
        other => return Err(ShellError::Unknown(other.to_string())),
    };
    Ok(ShellCommand::Run(action))
}

/// Reads commands until `quit` or end of input. Command failures are
/// printed and the loop goes on; only I/O on the streams ends it early.
pub fn run_shell<R, W>(store: &RosterStore, input: R, mut output: W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Roster ready. Autosave is active. Type `help` for commands.")?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match parse_shell_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => write!(output, "{HELP}")?,
            Ok(ShellCommand::Nothing) => {}
            Ok(ShellCommand::Run(action)) => {
                debug!(?action, "shell command");
                match execute(store, &action) {
                    Ok(text) => write!(output, "{text}")?,
                    Err(err) => writeln!(output, "error: {err}")?,
                }
            }
            Err(err) => writeln!(output, "error: {err}")?,
        }
        write!(output, "> ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/shell.rs"]
mod tests;
