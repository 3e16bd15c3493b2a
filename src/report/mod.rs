pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::{Gradable, ScoreRecord};

/// One rendered roster line: what a table view of the roster shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterRow {
    pub name: String,
    pub average: f64,
    pub grade: &'static str,
    pub scores: Vec<u8>,
}

impl RosterRow {
    pub fn from_record(record: &ScoreRecord) -> Self {
        Self {
            name: record.name().to_string(),
            average: record.average(),
            grade: record.letter_grade().as_str(),
            scores: record.scores().to_vec(),
        }
    }
}

pub fn rows(records: &[ScoreRecord]) -> Vec<RosterRow> {
    records.iter().map(RosterRow::from_record).collect()
}

pub fn format_average(v: f64) -> String {
    format!("{:.2}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
