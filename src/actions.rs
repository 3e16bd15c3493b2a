//! Frontend actions: what a user can ask of the roster, and the immediate
//! save that follows every successful edit.

use thiserror::Error;
use tracing::info;

use crate::model::record::score_in_range;
use crate::model::{RecordId, ScoreRecord};
use crate::report::json::render_roster_json;
use crate::report::text::render_roster_text;
use crate::report::rows;
use crate::roster::{RosterError, RosterStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    List { json: bool },
    Add { name: String },
    Remove { name: String },
    Rename { name: String, new_name: String },
    Score { name: String, value: String },
    SetScores { name: String, scores: String },
    Save,
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error("no student named {0:?}")]
    NotFound(String),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error("invalid input {0:?}: please enter whole numbers")]
    NotANumber(String),
    #[error("score out of range (0-100): {0}")]
    OutOfRange(i64),
    #[error("save failed, see log for details")]
    SaveFailed,
    #[error("failed to render roster: {0}")]
    Render(#[from] serde_json::Error),
}

/// Strict single score: must parse and lie in 0..=100.
pub fn parse_score(text: &str) -> Result<i64, ActionError> {
    let text = text.trim();
    let value = text
        .parse::<i64>()
        .map_err(|_| ActionError::NotANumber(text.to_string()))?;
    if !score_in_range(value) {
        return Err(ActionError::OutOfRange(value));
    }
    Ok(value)
}

/// Strict comma-separated list. An empty list clears the scores; any bad
/// entry rejects the whole list.
pub fn parse_score_list(text: &str) -> Result<Vec<i64>, ActionError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',').map(parse_score).collect()
}

fn lookup(store: &RosterStore, name: &str) -> Result<ScoreRecord, ActionError> {
    store
        .find_by_name(name)
        .ok_or_else(|| ActionError::NotFound(name.trim().to_string()))
}

fn persist(store: &RosterStore) {
    // Failures are logged by the store and retried by the next save.
    store.save();
}

pub fn execute(store: &RosterStore, action: &Action) -> Result<String, ActionError> {
    match action {
        Action::List { json } => {
            let rows = rows(&store.snapshot());
            if *json {
                let mut out = render_roster_json(&rows)?;
                out.push('\n');
                Ok(out)
            } else {
                Ok(render_roster_text(&rows))
            }
        }
        Action::Add { name } => {
            let id = store.add_record(name)?;
            persist(store);
            let name = record_name(store, id);
            info!(name = %name, "added student");
            Ok(format!("Added {name}.\n"))
        }
        Action::Remove { name } => {
            let record = lookup(store, name)?;
            let removed = store.remove_record(record.id())?;
            persist(store);
            info!(name = %removed.name(), "deleted student");
            Ok(format!("Deleted {}.\n", removed.name()))
        }
        Action::Rename { name, new_name } => {
            let record = lookup(store, name)?;
            let id = store.rename_record(record.id(), new_name)?;
            persist(store);
            let new_name = record_name(store, id);
            info!(from = %record.name(), to = %new_name, "renamed student");
            Ok(format!("Renamed {} to {new_name}.\n", record.name()))
        }
        Action::Score { name, value } => {
            let record = lookup(store, name)?;
            let value = parse_score(value)?;
            store.add_score(record.id(), value)?;
            persist(store);
            info!(name = %record.name(), score = value, "added score");
            Ok(format!("Added score {value} to {}.\n", record.name()))
        }
        Action::SetScores { name, scores } => {
            let record = lookup(store, name)?;
            let scores = parse_score_list(scores)?;
            let count = scores.len();
            store.update_scores(record.id(), scores)?;
            persist(store);
            info!(name = %record.name(), scores = count, "scores updated");
            Ok(format!("Scores updated for {}.\n", record.name()))
        }
        Action::Save => {
            if store.save() {
                Ok("Data saved.\n".to_string())
            } else {
                Err(ActionError::SaveFailed)
            }
        }
    }
}

fn record_name(store: &RosterStore, id: RecordId) -> String {
    store
        .get(id)
        .map(|r| r.name().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/src_inline/actions.rs"]
mod tests;
